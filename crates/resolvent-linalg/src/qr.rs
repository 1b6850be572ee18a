//! Householder QR on rectangular windows of a matrix.
//!
//! Both factorizations work in place on a window `rows x cols` of a larger
//! matrix and apply every reflector to all columns from the current pivot
//! to the right edge, so blocks that sit beside the window are carried
//! through the same orthogonal transformation.

use std::ops::Range;

use crate::dense_matrix::DenseMatrix;

/// An elementary reflector `I - beta * v v^T`.
#[derive(Clone, Debug)]
pub struct Householder {
    v: Vec<f64>,
    beta: f64,
}

impl Householder {
    /// Builds the reflector mapping `x` onto a multiple of the first unit
    /// vector.
    ///
    /// Returns `None` when every entry after the first is already zero, in
    /// which case no reflection is needed.
    #[must_use]
    pub fn new(x: &[f64]) -> Option<Self> {
        if x.len() < 2 {
            return None;
        }
        let tail: f64 = x[1..].iter().map(|v| v * v).sum();
        if tail == 0.0 {
            return None;
        }
        let norm = (x[0] * x[0] + tail).sqrt();
        let alpha = if x[0] >= 0.0 { -norm } else { norm };

        let mut v = x.to_vec();
        v[0] -= alpha;
        let vtv = v[0] * v[0] + tail;
        Some(Self { v, beta: 2.0 / vtv })
    }

    /// Applies the reflector to rows `row0..row0 + len` of every column in
    /// `cols`.
    pub fn apply_left(&self, m: &mut DenseMatrix<f64>, row0: usize, cols: Range<usize>) {
        for j in cols {
            let mut s = 0.0;
            for (i, vi) in self.v.iter().enumerate() {
                s += vi * m[(row0 + i, j)];
            }
            if s == 0.0 {
                continue;
            }
            let s = s * self.beta;
            for (i, vi) in self.v.iter().enumerate() {
                m[(row0 + i, j)] -= s * vi;
            }
        }
    }

    /// Applies the reflector to a vector the length of the reflector.
    pub fn apply_to_slice(&self, x: &mut [f64]) {
        let s: f64 = self.v.iter().zip(x.iter()).map(|(v, x)| v * x).sum();
        if s == 0.0 {
            return;
        }
        let s = s * self.beta;
        for (xi, vi) in x.iter_mut().zip(&self.v) {
            *xi -= s * vi;
        }
    }
}

fn column_segment(m: &DenseMatrix<f64>, rows: Range<usize>, col: usize) -> Vec<f64> {
    rows.map(|r| m[(r, col)]).collect()
}

fn column_norm_sq(m: &DenseMatrix<f64>, rows: Range<usize>, col: usize) -> f64 {
    rows.map(|r| m[(r, col)] * m[(r, col)]).sum()
}

/// Reflects column `col` below row `row` to zero and carries the reflector
/// through every column from `col` to the right edge.
fn eliminate_column(m: &mut DenseMatrix<f64>, row: usize, row_end: usize, col: usize) {
    let x = column_segment(m, row..row_end, col);
    if let Some(h) = Householder::new(&x) {
        h.apply_left(m, row, col..m.num_cols());
        for r in row + 1..row_end {
            m[(r, col)] = 0.0;
        }
    }
}

/// Unpivoted Householder QR of the window `rows x cols`.
///
/// On return the window is upper triangular. Columns right of the window
/// are multiplied by the same `Q^T`. Returns the number of eliminated
/// columns.
pub fn householder_qr(m: &mut DenseMatrix<f64>, rows: Range<usize>, cols: Range<usize>) -> usize {
    let steps = rows.len().min(cols.len());
    for k in 0..steps {
        eliminate_column(m, rows.start + k, rows.end, cols.start + k);
    }
    steps
}

/// Householder QR of a window, held apart from the matrix it came from.
///
/// Only the triangular factor and the reflectors are stored, so `Q^T` can
/// be applied to single columns of the source matrix without disturbing
/// the rest of it.
#[derive(Clone, Debug)]
pub struct WindowQr {
    r: DenseMatrix<f64>,
    // (step, reflector) for every step that needed a reflection
    reflectors: Vec<(usize, Householder)>,
}

impl WindowQr {
    /// Factors the window `rows x cols` of `m`, leaving `m` untouched.
    #[must_use]
    pub fn factor(m: &DenseMatrix<f64>, rows: Range<usize>, cols: Range<usize>) -> Self {
        let mut w = m.submatrix(rows, cols);
        let height = w.num_rows();
        let steps = height.min(w.num_cols());
        let mut reflectors = Vec::new();
        for k in 0..steps {
            let x = column_segment(&w, k..height, k);
            if let Some(h) = Householder::new(&x) {
                let ncols = w.num_cols();
                h.apply_left(&mut w, k, k..ncols);
                for r in k + 1..height {
                    w[(r, k)] = 0.0;
                }
                reflectors.push((k, h));
            }
        }
        w.truncate_rows(steps);
        Self { r: w, reflectors }
    }

    /// The upper-triangular factor, `min(rows, cols) x cols`.
    #[must_use]
    pub fn r(&self) -> &DenseMatrix<f64> {
        &self.r
    }

    /// Overwrites `x`, a column over the factored rows, with `Q^T x`.
    pub fn apply_transpose(&self, x: &mut [f64]) {
        for (k, h) in &self.reflectors {
            h.apply_to_slice(&mut x[*k..]);
        }
    }
}

/// Outcome of a column-pivoted QR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PivotedQr {
    /// Numerical rank of the window.
    pub rank: usize,
    /// `perm[k]` is the window-relative index of the column now at
    /// position `k`.
    pub perm: Vec<usize>,
}

/// Rank-revealing QR with column pivoting on the window `rows x cols`.
///
/// At each step the remaining window column of largest norm is swapped
/// into place. Swaps exchange the whole matrix column, so entries above the
/// window move with it. Elimination stops once every remaining column has
/// norm at most `tol`.
pub fn pivoted_qr(
    m: &mut DenseMatrix<f64>,
    rows: Range<usize>,
    cols: Range<usize>,
    tol: f64,
) -> PivotedQr {
    let width = cols.len();
    let mut perm: Vec<usize> = (0..width).collect();
    let steps = rows.len().min(width);
    let mut rank = 0;

    for k in 0..steps {
        let row = rows.start + k;
        let mut best = k;
        let mut best_norm = -1.0;
        for j in k..width {
            let norm = column_norm_sq(m, row..rows.end, cols.start + j);
            if norm > best_norm {
                best = j;
                best_norm = norm;
            }
        }
        if best_norm.sqrt() <= tol {
            break;
        }
        if best != k {
            m.swap_cols(cols.start + k, cols.start + best);
            perm.swap(k, best);
        }
        eliminate_column(m, row, rows.end, cols.start + k);
        rank += 1;
    }

    PivotedQr { rank, perm }
}
