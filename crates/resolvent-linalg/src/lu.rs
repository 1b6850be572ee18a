//! LU factorization with partial pivoting over `Complex64`.

use num_complex::Complex64;
use num_traits::Zero;

use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, Result};

/// Solves the square system `A x = b`.
///
/// A pivot is treated as zero when it is below machine epsilon times the
/// largest entry of `A`.
///
/// # Errors
///
/// Fails if `A` is not square, `b` has the wrong length, or `A` is
/// numerically singular.
pub fn lu_solve(a: &DenseMatrix<Complex64>, b: &[Complex64]) -> Result<Vec<Complex64>> {
    let n = a.num_rows();
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: n,
            cols: a.num_cols(),
        });
    }
    if b.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            found: b.len(),
        });
    }

    let scale = (0..n)
        .flat_map(|i| a.row(i).iter().map(|v| v.norm()))
        .fold(0.0, f64::max);
    let threshold = f64::EPSILON * scale;

    let mut lu = a.clone();
    let mut x = b.to_vec();

    for col in 0..n {
        let mut pivot = col;
        let mut pivot_norm = lu[(col, col)].norm();
        for row in col + 1..n {
            let v = lu[(row, col)].norm();
            if v > pivot_norm {
                pivot = row;
                pivot_norm = v;
            }
        }
        if pivot_norm <= threshold {
            return Err(LinalgError::Singular { pivot: col });
        }
        lu.swap_rows(col, pivot);
        x.swap(col, pivot);

        let diag = lu[(col, col)];
        for row in col + 1..n {
            let factor = lu[(row, col)] / diag;
            if factor.is_zero() {
                continue;
            }
            for k in col..n {
                let delta = factor * lu[(col, k)];
                lu[(row, k)] -= delta;
            }
            let delta = factor * x[col];
            x[row] -= delta;
        }
    }

    for i in (0..n).rev() {
        let mut s = x[i];
        for k in i + 1..n {
            s -= lu[(i, k)] * x[k];
        }
        x[i] = s / lu[(i, i)];
    }
    Ok(x)
}
