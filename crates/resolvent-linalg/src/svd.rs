//! Singular values by one-sided Jacobi rotations.
//!
//! Only the singular values are formed; they feed the conditioning gate of
//! the elimination pipeline, which compares the largest to the smallest.

use crate::dense_matrix::DenseMatrix;

/// Sweep limit for the Jacobi iteration.
const MAX_SWEEPS: usize = 60;

/// Singular values of `m`, largest first.
///
/// Wide matrices are transposed so that the rotations always act on the
/// shorter dimension.
#[must_use]
pub fn singular_values(m: &DenseMatrix<f64>) -> Vec<f64> {
    if m.num_rows() == 0 || m.num_cols() == 0 {
        return Vec::new();
    }
    let mut b = if m.num_rows() >= m.num_cols() {
        m.clone()
    } else {
        m.transpose()
    };
    let rows = b.num_rows();
    let cols = b.num_cols();
    let tol = cols as f64 * f64::EPSILON;

    for _sweep in 0..MAX_SWEEPS {
        let mut rotated = false;

        for p in 0..cols {
            for q in p + 1..cols {
                let mut alpha = 0.0;
                let mut beta = 0.0;
                let mut gamma = 0.0;
                for i in 0..rows {
                    let bp = b[(i, p)];
                    let bq = b[(i, q)];
                    alpha += bp * bp;
                    beta += bq * bq;
                    gamma += bp * bq;
                }

                if gamma == 0.0 || gamma.abs() <= tol * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                for i in 0..rows {
                    let bp = b[(i, p)];
                    let bq = b[(i, q)];
                    b[(i, p)] = c * bp - s * bq;
                    b[(i, q)] = s * bp + c * bq;
                }
            }
        }

        if !rotated {
            break;
        }
    }

    let mut values: Vec<f64> = (0..cols)
        .map(|j| (0..rows).map(|i| b[(i, j)] * b[(i, j)]).sum::<f64>().sqrt())
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    values
}

/// Ratio of the largest to the smallest singular value.
///
/// Returns infinity for a rank-deficient matrix and one for an empty one.
#[must_use]
pub fn condition_number(m: &DenseMatrix<f64>) -> f64 {
    let values = singular_values(m);
    match (values.first(), values.last()) {
        (Some(&max), Some(&min)) => {
            if min == 0.0 {
                f64::INFINITY
            } else {
                max / min
            }
        }
        _ => 1.0,
    }
}
