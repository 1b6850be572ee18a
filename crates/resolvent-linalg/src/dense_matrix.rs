//! Dense row-major matrices over `f64` and `Complex64`.

use std::ops::{Index, IndexMut, Range};

use num_traits::{Num, One, Zero};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    /// Matrix entries in row-major order.
    data: Vec<T>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<T: Copy + Zero> DenseMatrix<T> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![T::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<T> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length is not `num_rows * num_cols`.
    #[must_use]
    pub fn from_vec(num_rows: usize, num_cols: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the entry at (row, col), if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Returns a column as a vector.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<T> {
        (0..self.num_rows).map(|row| self[(row, col)]).collect()
    }

    /// Sets a column from a slice.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per row.
    pub fn set_col(&mut self, col: usize, values: &[T]) {
        assert_eq!(values.len(), self.num_rows);
        for (row, &val) in values.iter().enumerate() {
            self[(row, col)] = val;
        }
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }

    /// Copies out the block `rows x cols`.
    #[must_use]
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let mut out = Self::zeros(rows.len(), cols.len());
        for (i, r) in rows.enumerate() {
            out.row_mut(i)
                .copy_from_slice(&self.row(r)[cols.start..cols.end]);
        }
        out
    }

    /// Writes `block` into this matrix with its top-left corner at
    /// `(row, col)`.
    pub fn set_block(&mut self, row: usize, col: usize, block: &Self) {
        for i in 0..block.num_rows {
            self.row_mut(row + i)[col..col + block.num_cols].copy_from_slice(block.row(i));
        }
    }

    /// Keeps only the first `num_rows` rows.
    pub fn truncate_rows(&mut self, num_rows: usize) {
        if num_rows < self.num_rows {
            self.data.truncate(num_rows * self.num_cols);
            self.num_rows = num_rows;
        }
    }

    /// Applies `f` to every entry.
    #[must_use]
    pub fn map<U: Copy + Zero>(&self, f: impl Fn(T) -> U) -> DenseMatrix<U> {
        DenseMatrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Swaps two columns in-place across every row.
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for row in 0..self.num_rows {
            let start = row * self.num_cols;
            self.data.swap(start + i, start + j);
        }
    }
}

impl<T: Copy + Zero + One> DenseMatrix<T> {
    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }
}

impl<T: Copy + Num> DenseMatrix<T> {
    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not have one entry per column.
    #[must_use]
    pub fn mv(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for k in 0..self.num_cols {
                let a = self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.num_cols {
                    result[(i, j)] = result[(i, j)] + a * other[(k, j)];
                }
            }
        }
        result
    }
}

impl DenseMatrix<f64> {
    /// Largest absolute entry.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Checks whether every entry of `row` has magnitude at most `tol`.
    #[must_use]
    pub fn row_is_negligible(&self, row: usize, tol: f64) -> bool {
        self.row(row).iter().all(|v| v.abs() <= tol)
    }

    /// Sets every entry with magnitude below `tol` to exactly zero.
    pub fn snap_zeros(&mut self, tol: f64) {
        for v in &mut self.data {
            if v.abs() < tol {
                *v = 0.0;
            }
        }
    }

    /// Gauss-Jordan elimination with partial pivoting, in place.
    ///
    /// Columns whose remaining entries are all below `tol` are treated as
    /// free. On return the first `rank` rows hold the reduced rows with unit
    /// pivots, every pivot column is zero outside its pivot row, and entries
    /// below `tol` are snapped to zero. Returns the pivot columns in order.
    pub fn rref_in_place(&mut self, tol: f64) -> Vec<usize> {
        let mut pivots = Vec::new();
        let mut pivot_row = 0;

        for col in 0..self.num_cols {
            if pivot_row == self.num_rows {
                break;
            }

            let mut best = pivot_row;
            let mut best_abs = self[(pivot_row, col)].abs();
            for row in pivot_row + 1..self.num_rows {
                let v = self[(row, col)].abs();
                if v > best_abs {
                    best = row;
                    best_abs = v;
                }
            }

            if best_abs <= tol {
                for row in pivot_row..self.num_rows {
                    self[(row, col)] = 0.0;
                }
                continue;
            }

            self.swap_rows(pivot_row, best);

            let inv = 1.0 / self[(pivot_row, col)];
            for v in &mut self.row_mut(pivot_row)[col..] {
                *v *= inv;
            }
            self[(pivot_row, col)] = 1.0;

            for row in 0..self.num_rows {
                if row == pivot_row {
                    continue;
                }
                let factor = self[(row, col)];
                if factor == 0.0 {
                    continue;
                }
                for k in col..self.num_cols {
                    let delta = factor * self[(pivot_row, k)];
                    self[(row, k)] -= delta;
                }
                self[(row, col)] = 0.0;
            }

            pivots.push(col);
            pivot_row += 1;
        }

        self.snap_zeros(tol);
        pivots
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_mm() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let i = DenseMatrix::identity(2);
        assert_eq!(a.mm(&i), a);
        assert_eq!(i.mm(&a), a);
        let sq = a.mm(&a);
        assert_eq!(sq, DenseMatrix::from_rows(vec![vec![7.0, 10.0], vec![15.0, 22.0]]));
    }

    #[test]
    fn test_mv_and_transpose() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 0.0]]);
        assert_eq!(a.mv(&[1.0, 1.0, 1.0]), vec![3.0, 3.0]);
        let t = a.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t[(2, 0)], 2.0);
    }

    #[test]
    fn test_swaps_and_blocks() {
        let mut a = DenseMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        a.swap_cols(0, 2);
        assert_eq!(a.row(0), &[3.0, 2.0, 1.0]);
        a.swap_rows(0, 1);
        assert_eq!(a.row(0), &[6.0, 5.0, 4.0]);

        let block = a.submatrix(0..2, 1..3);
        assert_eq!(block, DenseMatrix::from_rows(vec![vec![5.0, 4.0], vec![2.0, 1.0]]));

        let mut z = DenseMatrix::zeros(3, 3);
        z.set_block(1, 1, &block);
        assert_eq!(z[(2, 2)], 1.0);
        assert_eq!(z[(0, 0)], 0.0);

        z.truncate_rows(1);
        assert_eq!(z.num_rows(), 1);
    }

    #[test]
    fn test_rref_full_rank() {
        let mut a = DenseMatrix::from_rows(vec![
            vec![2.0, 1.0, -1.0, 8.0],
            vec![-3.0, -1.0, 2.0, -11.0],
            vec![-2.0, 1.0, 2.0, -3.0],
        ]);
        let pivots = a.rref_in_place(1e-12);
        assert_eq!(pivots, vec![0, 1, 2]);
        let expected = [2.0, 3.0, -1.0];
        for (i, e) in expected.iter().enumerate() {
            assert!((a[(i, 3)] - e).abs() < 1e-12);
            assert_eq!(a[(i, i)], 1.0);
        }
    }

    #[test]
    fn test_rref_rank_deficient() {
        let mut a = DenseMatrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 4.0, 6.0],
            vec![1.0, 0.0, 1.0],
        ]);
        let pivots = a.rref_in_place(1e-12);
        assert_eq!(pivots, vec![0, 1]);
        assert!(a.row_is_negligible(2, 0.0));
    }
}
