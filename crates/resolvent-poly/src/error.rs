//! Error type for polynomial construction and arithmetic.

use thiserror::Error;

use crate::polynomial::Basis;

/// Errors produced by [`crate::Polynomial`] operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PolyError {
    /// A polynomial needs at least one variable.
    #[error("a polynomial needs at least one variable")]
    NoVariables,

    /// The coefficient buffer does not fill the declared shape.
    #[error("coefficient array of length {len} does not match shape {shape:?}")]
    ShapeMismatch {
        /// Declared per-variable extents.
        shape: Vec<usize>,
        /// Number of coefficients supplied.
        len: usize,
    },

    /// Operands live in different numbers of variables.
    #[error("expected {expected} variables, found {found}")]
    DimensionMismatch {
        /// Dimension of the receiver.
        expected: usize,
        /// Dimension of the argument.
        found: usize,
    },

    /// Operands are expressed in different bases.
    #[error("cannot combine a {left} polynomial with a {right} polynomial")]
    BasisMismatch {
        /// Basis of the receiver.
        left: Basis,
        /// Basis of the argument.
        right: Basis,
    },

    /// Promotion can only add variables.
    #[error("cannot promote a {from}-variable polynomial to {to} variables")]
    CannotTruncate {
        /// Current number of variables.
        from: usize,
        /// Requested number of variables.
        to: usize,
    },
}

/// Result alias for polynomial operations.
pub type Result<T> = std::result::Result<T, PolyError>;
