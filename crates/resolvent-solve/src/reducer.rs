//! Rank-revealing orthogonal reduction of a Macaulay matrix.
//!
//! The columns are split by the cuts `(c0, c1)` into a leading block, a
//! middle block and a trailing block (the constant and the single
//! variables). The reduction:
//!
//! 1. eliminates the leading block column by orthogonal transformations,
//! 2. runs column-pivoted QR on the middle block below the leading rows,
//!    permuting the column labels with it,
//! 3. triangularizes the trailing block on any rows left past the revealed
//!    rank,
//! 4. drops numerically zero trailing rows,
//! 5. checks the condition number of the leading square block,
//! 6. back-substitutes to `[I | X]`.
//!
//! Each row `r` of the result says that the monomial labelling column `r`
//! equals minus the row of `X` applied to the remaining labels.

use tracing::debug;

use resolvent_linalg::{backsolve_in_place, condition_number, householder_qr, pivoted_qr, DenseMatrix, WindowQr};
use resolvent_poly::Monomial;

use crate::config::{ReductionStrategy, SolverConfig};
use crate::error::{Result, RootError};

/// A Macaulay matrix reduced to `[I | X]`.
#[derive(Clone, Debug)]
pub struct Reduction {
    /// The reduced rows `[I | X]`.
    pub matrix: DenseMatrix<f64>,
    /// Column labels after pivoting.
    pub labels: Vec<Monomial>,
    /// `perm[k]` is the original index of the column now at position `k`.
    pub perm: Vec<usize>,
}

impl Reduction {
    /// Number of eliminated monomials.
    #[must_use]
    pub fn height(&self) -> usize {
        self.matrix.num_rows()
    }

    /// Labels of the identity block, one per row.
    #[must_use]
    pub fn eliminated(&self) -> &[Monomial] {
        &self.labels[..self.height()]
    }

    /// Labels of the `X` block.
    #[must_use]
    pub fn remaining(&self) -> &[Monomial] {
        &self.labels[self.height()..]
    }

    /// Entry `(row, j)` of `X`.
    #[must_use]
    pub fn relation(&self, row: usize, j: usize) -> f64 {
        self.matrix[(row, self.height() + j)]
    }
}

/// Orthogonal Macaulay reducer.
#[derive(Clone, Debug)]
pub struct Reducer {
    strategy: ReductionStrategy,
    accuracy: f64,
    zero_tol: f64,
}

fn leading_column(row: &[f64], tol: f64) -> usize {
    row.iter().position(|v| v.abs() > tol).unwrap_or(row.len())
}

/// Stable-sorts the rows of `m` by leading column, swapping in place.
fn sort_rows_by_leading_column(m: &mut DenseMatrix<f64>, tol: f64) {
    let rows = m.num_rows();
    let mut order: Vec<usize> = (0..rows).collect();
    order.sort_by_key(|&r| leading_column(m.row(r), tol));

    // position[r] is where input row r sits now; holder[p] is the reverse
    let mut position: Vec<usize> = (0..rows).collect();
    let mut holder: Vec<usize> = (0..rows).collect();
    for (i, &wanted) in order.iter().enumerate() {
        let p = position[wanted];
        if p != i {
            m.swap_rows(i, p);
            let displaced = holder[i];
            holder.swap(i, p);
            position[wanted] = i;
            position[displaced] = p;
        }
    }
}

fn ensure_conditioned(block: &DenseMatrix<f64>, accuracy: f64) -> Result<f64> {
    let condition = condition_number(block);
    // written so that a NaN condition number is rejected too
    if condition * accuracy <= 1.0 {
        Ok(condition)
    } else {
        Err(RootError::Unstable { condition })
    }
}

impl Reducer {
    /// Creates a reducer.
    #[must_use]
    pub fn new(strategy: ReductionStrategy, accuracy: f64, zero_tol: f64) -> Self {
        Self {
            strategy,
            accuracy,
            zero_tol,
        }
    }

    /// Creates a reducer from solver settings.
    #[must_use]
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.strategy, config.accuracy, config.zero_tol)
    }

    /// Reduces `m` in place; its columns are labelled by `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`RootError::InvalidCuts`] if the cuts or labels do not fit
    /// the matrix and [`RootError::Unstable`] if the leading block is rank
    /// deficient or too ill-conditioned.
    pub fn reduce(
        &self,
        mut m: DenseMatrix<f64>,
        labels: &[Monomial],
        cuts: (usize, usize),
    ) -> Result<Reduction> {
        let (c0, c1) = cuts;
        let rows = m.num_rows();
        let cols = m.num_cols();
        if c0 > c1 || c1 > cols || labels.len() != cols {
            return Err(RootError::InvalidCuts { c0, c1, cols });
        }
        if rows < c0 {
            return Err(RootError::Unstable {
                condition: f64::INFINITY,
            });
        }

        sort_rows_by_leading_column(&mut m, self.zero_tol);

        match self.strategy {
            ReductionStrategy::Orthogonal => {
                householder_qr(&mut m, 0..rows, 0..c0);
            }
            ReductionStrategy::SchurComplement => self.schur_leading(&mut m, c0)?,
        }

        let mut labels = labels.to_vec();
        let mut perm: Vec<usize> = (0..cols).collect();

        let pivoted = pivoted_qr(&mut m, c0..rows, c0..c1, self.zero_tol);
        let old_labels = labels[c0..c1].to_vec();
        for (k, &p) in pivoted.perm.iter().enumerate() {
            labels[c0 + k] = old_labels[p].clone();
            perm[c0 + k] = c0 + p;
        }

        let tail = c0 + pivoted.rank;
        for r in tail..rows {
            for c in c0..c1 {
                m[(r, c)] = 0.0;
            }
        }
        householder_qr(&mut m, tail..rows, c1..cols);

        self.finish(m, labels, perm, c0)
    }

    /// Leading-block elimination by early back substitution.
    ///
    /// The leading columns are factored over every row, but `Q^T` only
    /// overwrites the top `c0` rows. The rows below keep their entries and
    /// are updated with the Schur complement `EF - D * BC`.
    fn schur_leading(&self, m: &mut DenseMatrix<f64>, c0: usize) -> Result<()> {
        if c0 == 0 {
            return Ok(());
        }
        let rows = m.num_rows();
        let cols = m.num_cols();

        let qr = WindowQr::factor(m, 0..rows, 0..c0);
        ensure_conditioned(qr.r(), self.accuracy)?;

        let mut column = vec![0.0; rows];
        for j in c0..cols {
            for (i, v) in column.iter_mut().enumerate() {
                *v = m[(i, j)];
            }
            qr.apply_transpose(&mut column);
            for (i, &v) in column[..c0].iter().enumerate() {
                m[(i, j)] = v;
            }
        }
        m.set_block(0, 0, qr.r());
        // only the top rows are read here
        backsolve_in_place(m, c0)?;

        for r in c0..rows {
            for k in 0..c0 {
                let d = m[(r, k)];
                if d == 0.0 {
                    continue;
                }
                for j in c0..cols {
                    let delta = d * m[(k, j)];
                    m[(r, j)] -= delta;
                }
                m[(r, k)] = 0.0;
            }
        }
        Ok(())
    }

    fn finish(
        &self,
        mut m: DenseMatrix<f64>,
        labels: Vec<Monomial>,
        perm: Vec<usize>,
        c0: usize,
    ) -> Result<Reduction> {
        let mut height = m.num_rows().min(m.num_cols());
        while height > 0 && m.row_is_negligible(height - 1, self.zero_tol) {
            height -= 1;
        }
        if (height..m.num_rows()).any(|r| !m.row_is_negligible(r, self.zero_tol)) {
            return Err(RootError::Unstable {
                condition: f64::INFINITY,
            });
        }
        m.truncate_rows(height);

        if height < c0 {
            return Err(RootError::Unstable {
                condition: f64::INFINITY,
            });
        }

        let condition = ensure_conditioned(&m.submatrix(0..height, 0..height), self.accuracy)?;
        backsolve_in_place(&mut m, height)?;

        debug!(
            eliminated = height,
            basis = m.num_cols() - height,
            condition,
            "reduced Macaulay matrix"
        );
        Ok(Reduction {
            matrix: m,
            labels,
            perm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<Monomial> {
        (0..n).map(|i| Monomial::new(&[u32::try_from(n - 1 - i).unwrap()])).collect()
    }

    fn reducer(strategy: ReductionStrategy) -> Reducer {
        Reducer::new(strategy, 1e-10, 1e-10)
    }

    #[test]
    fn test_reduced_input_is_a_fixed_point() {
        let m = DenseMatrix::from_rows(vec![
            vec![1.0, 0.0, 0.0, 2.0, -1.0],
            vec![0.0, 1.0, 0.0, 0.5, 3.0],
            vec![0.0, 0.0, 1.0, -4.0, 0.0],
        ]);
        let cuts = (0, 0);
        let r = reducer(ReductionStrategy::Orthogonal)
            .reduce(m.clone(), &labels(5), cuts)
            .unwrap();
        assert_eq!(r.matrix, m);
        assert_eq!(r.perm, vec![0, 1, 2, 3, 4]);

        let again = reducer(ReductionStrategy::Orthogonal)
            .reduce(r.matrix.clone(), &r.labels, cuts)
            .unwrap();
        assert_eq!(again.matrix, r.matrix);
        assert_eq!(again.labels, r.labels);
    }

    #[test]
    fn test_output_is_identity_then_x() {
        let m = DenseMatrix::from_rows(vec![
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 3.0, 1.0, 0.0],
            vec![0.0, 1.0, 4.0, 2.0],
        ]);
        for strategy in [ReductionStrategy::Orthogonal, ReductionStrategy::SchurComplement] {
            let r = reducer(strategy).reduce(m.clone(), &labels(4), (1, 3)).unwrap();
            assert_eq!(r.height(), 3);
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_eq!(r.matrix[(i, j)], expected);
                }
            }
            assert_eq!(r.remaining().len(), 1);
        }
    }

    #[test]
    fn test_rows_sorted_in_place() {
        let mut m = DenseMatrix::from_rows(vec![
            vec![0.0, 0.0, 3.0],
            vec![0.0, 1.0, 0.0],
            vec![2.0, 0.0, 0.0],
            vec![0.0, 4.0, 1.0],
        ]);
        sort_rows_by_leading_column(&mut m, 1e-10);
        assert_eq!(
            m,
            DenseMatrix::from_rows(vec![
                vec![2.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 4.0, 1.0],
                vec![0.0, 0.0, 3.0],
            ])
        );
    }

    #[test]
    fn test_schur_with_singular_top_rows() {
        // after sorting, the top two rows only reach the first leading
        // column; the second one is carried by a lower row
        let m = DenseMatrix::from_rows(vec![
            vec![1.0, 0.0, 1.0, 0.0, 1.0],
            vec![2.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 1.0, 1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 2.0, 1.0],
        ]);
        let orthogonal = reducer(ReductionStrategy::Orthogonal)
            .reduce(m.clone(), &labels(5), (2, 3))
            .unwrap();
        let schur = reducer(ReductionStrategy::SchurComplement)
            .reduce(m, &labels(5), (2, 3))
            .unwrap();
        assert_eq!(schur.height(), 4);
        assert_eq!(schur.labels, orthogonal.labels);
        for r in 0..4 {
            for c in 0..5 {
                assert!((schur.matrix[(r, c)] - orthogonal.matrix[(r, c)]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_drops_zero_rows() {
        // x^2 + 1, 2x^2 + 2, x + 1
        let m = DenseMatrix::from_rows(vec![
            vec![1.0, 0.0, 1.0],
            vec![2.0, 0.0, 2.0],
            vec![0.0, 1.0, 1.0],
        ]);
        for strategy in [ReductionStrategy::Orthogonal, ReductionStrategy::SchurComplement] {
            let r = reducer(strategy).reduce(m.clone(), &labels(3), (1, 2)).unwrap();
            assert_eq!(r.height(), 2);
            assert_eq!(r.remaining(), &[Monomial::one(1)]);
            assert!((r.relation(0, 0) - 1.0).abs() < 1e-12);
            assert!((r.relation(1, 0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rank_deficient_middle_block() {
        // the middle column never pivots but the constant column survives
        let m = DenseMatrix::from_rows(vec![
            vec![1.0, 1.0, 0.0],
            vec![2.0, 2.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]);
        assert!(matches!(
            reducer(ReductionStrategy::Orthogonal).reduce(m, &labels(3), (1, 2)),
            Err(RootError::Unstable { .. })
        ));
    }

    #[test]
    fn test_too_few_rows_is_unstable() {
        let m = DenseMatrix::from_rows(vec![vec![1.0, 0.0, 0.0]]);
        assert_eq!(
            reducer(ReductionStrategy::Orthogonal)
                .reduce(m, &labels(3), (2, 2))
                .unwrap_err(),
            RootError::Unstable {
                condition: f64::INFINITY
            }
        );
    }

    #[test]
    fn test_ill_conditioned_leading_block() {
        let m = DenseMatrix::from_rows(vec![
            vec![1.0, 1.0, 0.0],
            vec![1.0, 1.0 + 1e-13, 1.0],
        ]);
        let err = reducer(ReductionStrategy::Orthogonal)
            .reduce(m, &labels(3), (2, 2))
            .unwrap_err();
        match err {
            RootError::Unstable { condition } => assert!(condition > 1e10),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_cuts() {
        let m = DenseMatrix::from_rows(vec![vec![1.0, 0.0]]);
        assert_eq!(
            reducer(ReductionStrategy::Orthogonal)
                .reduce(m.clone(), &labels(2), (2, 1))
                .unwrap_err(),
            RootError::InvalidCuts { c0: 2, c1: 1, cols: 2 }
        );
        assert!(reducer(ReductionStrategy::Orthogonal)
            .reduce(m, &labels(3), (0, 0))
            .is_err());
    }
}
