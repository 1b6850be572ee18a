//! Upper-triangular back substitution.

use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, Result};

/// Solves `R X = B` in place, where `R` is the leading `height x height`
/// block of `m` and `B` holds the columns to its right.
///
/// On success `R` is overwritten with the identity and `B` with `X`, so the
/// first `height` rows read `[I | X]`.
///
/// # Errors
///
/// Fails with [`LinalgError::Singular`] on a zero diagonal entry and with
/// [`LinalgError::DimensionMismatch`] if the block does not fit.
pub fn backsolve_in_place(m: &mut DenseMatrix<f64>, height: usize) -> Result<()> {
    if height > m.num_rows() || height > m.num_cols() {
        return Err(LinalgError::DimensionMismatch {
            expected: height,
            found: m.num_rows().min(m.num_cols()),
        });
    }
    if let Some(pivot) = (0..height).find(|&i| m[(i, i)] == 0.0) {
        return Err(LinalgError::Singular { pivot });
    }

    for j in height..m.num_cols() {
        for i in (0..height).rev() {
            let mut s = m[(i, j)];
            for k in i + 1..height {
                s -= m[(i, k)] * m[(k, j)];
            }
            m[(i, j)] = s / m[(i, i)];
        }
    }

    for i in 0..height {
        for k in 0..height {
            m[(i, k)] = if i == k { 1.0 } else { 0.0 };
        }
    }
    Ok(())
}
