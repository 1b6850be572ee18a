//! Error type for the root finder.

use thiserror::Error;

use resolvent_groebner::GroebnerError;
use resolvent_linalg::LinalgError;
use resolvent_poly::{Basis, PolyError};

/// Errors produced by [`crate::find_roots`] and its stages.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RootError {
    /// No polynomials were supplied.
    #[error("cannot solve an empty system")]
    EmptySystem,

    /// The polynomials are not all in the same basis.
    #[error("all polynomials must share one basis, found {first} and {other}")]
    TypeMismatch {
        /// Basis of the first polynomial.
        first: Basis,
        /// First basis that differs from it.
        other: Basis,
    },

    /// The solution set is not a finite set of points.
    #[error("the system does not have finitely many solutions")]
    NotZeroDimensional,

    /// The leading block of the reduced Macaulay matrix is ill-conditioned.
    #[error("Macaulay reduction is unstable (condition number {condition:e})")]
    Unstable {
        /// Ratio of largest to smallest singular value; infinite when the
        /// block is rank deficient.
        condition: f64,
    },

    /// The column cuts do not fit the matrix.
    #[error("column cuts ({c0}, {c1}) do not fit a matrix with {cols} columns")]
    InvalidCuts {
        /// End of the leading block.
        c0: usize,
        /// Start of the trailing block.
        c1: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The chosen method cannot handle this system.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A product could not be expressed in the quotient basis.
    #[error("cannot reduce into the quotient basis: {0}")]
    DivisionFailure(String),

    /// Newton's method hit a singular Jacobian.
    #[error("singular Jacobian at Newton iteration {iteration}")]
    SingularJacobian {
        /// Zero-based iteration that failed.
        iteration: usize,
    },

    /// Newton's method needs as many equations as unknowns.
    #[error("Newton polishing needs a square system, got {polys} polynomials in {vars} variables")]
    NonSquareSystem {
        /// Number of polynomials.
        polys: usize,
        /// Number of variables.
        vars: usize,
    },

    /// Polynomial arithmetic failed.
    #[error(transparent)]
    Poly(#[from] PolyError),

    /// Groebner basis or Macaulay matrix construction failed.
    #[error(transparent)]
    Groebner(#[from] GroebnerError),

    /// A dense linear algebra routine failed.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

/// Result alias for the root finder.
pub type Result<T> = std::result::Result<T, RootError>;
