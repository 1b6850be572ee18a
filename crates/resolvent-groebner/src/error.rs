//! Error type for Groebner basis and Macaulay matrix computations.

use thiserror::Error;

use resolvent_poly::PolyError;

/// Errors produced while building Macaulay matrices or Groebner bases.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GroebnerError {
    /// No generators were supplied.
    #[error("cannot build a Macaulay matrix from an empty system")]
    EmptyInput,

    /// A product landed outside the enumerated columns.
    #[error("monomial {0} has no column in the Macaulay matrix")]
    MissingColumn(String),

    /// Buchberger's algorithm exceeded its pair budget.
    #[error("Groebner basis computation exceeded {limit} S-pairs")]
    PairLimit {
        /// Configured maximum.
        limit: usize,
    },

    /// Polynomial arithmetic failed.
    #[error(transparent)]
    Poly(#[from] PolyError),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, GroebnerError>;
