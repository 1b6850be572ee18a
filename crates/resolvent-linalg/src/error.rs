//! Error type for dense linear algebra.

use thiserror::Error;

/// Errors produced by the dense solvers in this crate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinalgError {
    /// A pivot vanished during elimination or back substitution.
    #[error("matrix is singular (zero pivot at position {pivot})")]
    Singular {
        /// Diagonal position of the failing pivot.
        pivot: usize,
    },

    /// Operand shapes are incompatible.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Required size.
        expected: usize,
        /// Supplied size.
        found: usize,
    },

    /// The operation needs a square matrix.
    #[error("expected a square matrix, found {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The shifted QR iteration did not deflate in time.
    #[error("eigenvalue iteration did not converge after {iterations} iterations")]
    NoConvergence {
        /// Iterations spent before giving up.
        iterations: usize,
    },
}

/// Result alias for linear algebra operations.
pub type Result<T> = std::result::Result<T, LinalgError>;
