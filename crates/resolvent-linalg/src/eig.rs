//! Eigenvalues and eigenvectors of general real matrices.
//!
//! Algorithm:
//! 1. Reduce to upper Hessenberg form with complex Householder reflectors,
//!    accumulating the unitary factor `Z`.
//! 2. Run single-shift complex QR with Givens rotations and a Wilkinson
//!    shift until every subdiagonal entry deflates, leaving the Schur form
//!    `T = Z^H A Z`.
//! 3. Solve `(T - t_kk I) y = 0` by back substitution for each `k` and map
//!    back with `v = Z y`.
//!
//! Working in complex arithmetic throughout means complex conjugate pairs
//! need no special handling.

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, Result};

/// Iteration limits for the shifted QR sweep.
#[derive(Clone, Debug)]
pub struct EigConfig {
    /// QR iterations allowed per eigenvalue before giving up.
    pub max_iterations_per_value: usize,
    /// Period of the exceptional shift used to break cycling.
    pub exceptional_shift_period: usize,
}

impl Default for EigConfig {
    fn default() -> Self {
        Self {
            max_iterations_per_value: 60,
            exceptional_shift_period: 10,
        }
    }
}

/// Eigenvalues with unit-norm eigenvectors stored as matrix columns.
#[derive(Clone, Debug)]
pub struct Eigen {
    /// Eigenvalues in Schur-form order.
    pub values: Vec<Complex64>,
    /// Column `k` is an eigenvector for `values[k]`.
    pub vectors: DenseMatrix<Complex64>,
}

impl Eigen {
    /// Returns eigenvector `k` as an owned vector.
    #[must_use]
    pub fn vector(&self, k: usize) -> Vec<Complex64> {
        self.vectors.col(k)
    }
}

/// Computes all eigenpairs of a real square matrix.
///
/// # Errors
///
/// Fails if the matrix is not square or the QR iteration stalls.
pub fn eig(a: &DenseMatrix<f64>, config: &EigConfig) -> Result<Eigen> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.num_rows(),
            cols: a.num_cols(),
        });
    }
    let n = a.num_rows();
    let mut h = a.map(|v| Complex64::new(v, 0.0));
    let mut z = DenseMatrix::<Complex64>::identity(n);

    hessenberg_reduction(&mut h, &mut z);
    schur_iteration(&mut h, &mut z, config)?;

    let values = (0..n).map(|k| h[(k, k)]).collect();
    let vectors = triangular_eigenvectors(&h, &z);
    Ok(Eigen { values, vectors })
}

fn hessenberg_reduction(h: &mut DenseMatrix<Complex64>, z: &mut DenseMatrix<Complex64>) {
    let n = h.num_rows();

    for k in 0..n.saturating_sub(2) {
        let x: Vec<Complex64> = (k + 1..n).map(|i| h[(i, k)]).collect();
        let tail: f64 = x[1..].iter().map(Complex64::norm_sqr).sum();
        if tail == 0.0 {
            continue;
        }

        let x0_abs = x[0].norm();
        let norm = (x0_abs * x0_abs + tail).sqrt();
        let phase = if x0_abs == 0.0 {
            Complex64::one()
        } else {
            x[0] / x0_abs
        };
        let alpha = -phase * norm;

        let mut v = x;
        v[0] -= alpha;
        let vnorm: f64 = v.iter().map(Complex64::norm_sqr).sum();
        let beta = 2.0 / vnorm;

        // H <- P H with P = I - beta v v^H acting on rows k+1..n
        for j in 0..n {
            let mut s = Complex64::zero();
            for (i, vi) in v.iter().enumerate() {
                s += vi.conj() * h[(k + 1 + i, j)];
            }
            let s = s * beta;
            for (i, vi) in v.iter().enumerate() {
                h[(k + 1 + i, j)] -= vi * s;
            }
        }

        // H <- H P and Z <- Z P acting on columns k+1..n
        for m in [&mut *h, &mut *z] {
            for i in 0..n {
                let mut s = Complex64::zero();
                for (j, vj) in v.iter().enumerate() {
                    s += m[(i, k + 1 + j)] * vj;
                }
                let s = s * beta;
                for (j, vj) in v.iter().enumerate() {
                    m[(i, k + 1 + j)] -= s * vj.conj();
                }
            }
        }

        for i in k + 2..n {
            h[(i, k)] = Complex64::zero();
        }
    }
}

/// Givens rotation `G = [[conj(c), conj(s)], [-s, c]]` with `G [a; b] = [r; 0]`.
#[derive(Clone, Copy)]
struct Givens {
    c: Complex64,
    s: Complex64,
}

impl Givens {
    fn new(a: Complex64, b: Complex64) -> Option<Self> {
        let r = (a.norm_sqr() + b.norm_sqr()).sqrt();
        if r == 0.0 || b.norm() == 0.0 {
            return None;
        }
        Some(Self { c: a / r, s: b / r })
    }

    fn apply_left(self, m: &mut DenseMatrix<Complex64>, k: usize, cols: std::ops::Range<usize>) {
        for j in cols {
            let x = m[(k, j)];
            let y = m[(k + 1, j)];
            m[(k, j)] = self.c.conj() * x + self.s.conj() * y;
            m[(k + 1, j)] = -self.s * x + self.c * y;
        }
    }

    fn apply_right_adjoint(self, m: &mut DenseMatrix<Complex64>, k: usize, rows: std::ops::Range<usize>) {
        for i in rows {
            let x = m[(i, k)];
            let y = m[(i, k + 1)];
            m[(i, k)] = x * self.c + y * self.s;
            m[(i, k + 1)] = -x * self.s.conj() + y * self.c.conj();
        }
    }
}

/// Eigenvalue of the trailing 2x2 block closest to its bottom-right entry.
fn wilkinson_shift(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Complex64 {
    let half_tr = (a + d) * 0.5;
    let half_diff = (a - d) * 0.5;
    let disc = (half_diff * half_diff + b * c).sqrt();
    let mu1 = half_tr + disc;
    let mu2 = half_tr - disc;
    if (mu1 - d).norm() <= (mu2 - d).norm() {
        mu1
    } else {
        mu2
    }
}

fn schur_iteration(
    h: &mut DenseMatrix<Complex64>,
    z: &mut DenseMatrix<Complex64>,
    config: &EigConfig,
) -> Result<()> {
    let n = h.num_rows();
    if n < 2 {
        return Ok(());
    }
    let scale = (0..n)
        .flat_map(|i| h.row(i).iter().map(|v| v.norm()))
        .fold(0.0, f64::max);
    let limit = config.max_iterations_per_value * n;
    let mut total = 0;
    let mut since_deflation = 0;
    let mut hi = n - 1;

    while hi > 0 {
        // smallest lo such that h[lo..=hi] is unreduced
        let mut lo = hi;
        while lo > 0 {
            let mut s = h[(lo - 1, lo - 1)].norm() + h[(lo, lo)].norm();
            if s == 0.0 {
                s = scale;
            }
            if h[(lo, lo - 1)].norm() <= f64::EPSILON * s {
                h[(lo, lo - 1)] = Complex64::zero();
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            since_deflation = 0;
            continue;
        }

        total += 1;
        since_deflation += 1;
        if total > limit {
            return Err(LinalgError::NoConvergence { iterations: total });
        }

        let mu = if since_deflation % config.exceptional_shift_period == 0 {
            h[(hi, hi)] + h[(hi, hi - 1)].norm() * 0.75
        } else {
            wilkinson_shift(
                h[(hi - 1, hi - 1)],
                h[(hi - 1, hi)],
                h[(hi, hi - 1)],
                h[(hi, hi)],
            )
        };

        for k in lo..=hi {
            h[(k, k)] -= mu;
        }

        let mut rotations = Vec::with_capacity(hi - lo);
        for k in lo..hi {
            let g = Givens::new(h[(k, k)], h[(k + 1, k)]);
            if let Some(g) = g {
                g.apply_left(h, k, k..n);
                h[(k + 1, k)] = Complex64::zero();
            }
            rotations.push(g);
        }
        for (k, g) in (lo..hi).zip(rotations) {
            if let Some(g) = g {
                g.apply_right_adjoint(h, k, 0..(k + 2).min(hi + 1));
                g.apply_right_adjoint(z, k, 0..n);
            }
        }

        for k in lo..=hi {
            h[(k, k)] += mu;
        }
    }

    for i in 1..n {
        for j in 0..i {
            h[(i, j)] = Complex64::zero();
        }
    }
    Ok(())
}

fn triangular_eigenvectors(
    t: &DenseMatrix<Complex64>,
    z: &DenseMatrix<Complex64>,
) -> DenseMatrix<Complex64> {
    let n = t.num_rows();
    let norm = (0..n)
        .flat_map(|i| t.row(i).iter().map(|v| v.norm()))
        .fold(0.0, f64::max);
    let small = f64::EPSILON * norm.max(f64::MIN_POSITIVE);

    let mut vectors = DenseMatrix::<Complex64>::zeros(n, n);
    for k in 0..n {
        let lambda = t[(k, k)];
        let mut y = vec![Complex64::zero(); k + 1];
        y[k] = Complex64::one();
        for j in (0..k).rev() {
            let mut s = Complex64::zero();
            for l in j + 1..=k {
                s += t[(j, l)] * y[l];
            }
            let mut denom = t[(j, j)] - lambda;
            if denom.norm() < small {
                denom = Complex64::new(small, 0.0);
            }
            y[j] = -s / denom;
        }

        let mut v: Vec<Complex64> = (0..n)
            .map(|i| (0..=k).map(|l| z[(i, l)] * y[l]).sum())
            .collect();
        let len = v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
        if len > 0.0 {
            for x in &mut v {
                *x /= len;
            }
        }
        vectors.set_col(k, &v);
    }
    vectors
}
