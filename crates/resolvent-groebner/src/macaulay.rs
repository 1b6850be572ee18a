//! Macaulay matrix construction.
//!
//! Every generator `p` is multiplied by each monomial of total degree at most
//! `D - deg(p)`, where `D = sum(deg) - n_polys + 1` is the Macaulay bound, and
//! the products become the rows of a matrix whose columns are all monomials
//! of degree at most `D` in descending grevlex order. Rows are ordered by
//! their leading column so the matrix is close to echelon form before any
//! elimination.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use resolvent_linalg::DenseMatrix;
use resolvent_poly::{monomials_up_to_degree, Basis, Monomial, MonomialOrder, PolyError, Polynomial};

use crate::error::{GroebnerError, Result};

/// A row in the Macaulay matrix: one generator times one multiplier.
#[derive(Clone, Debug)]
pub struct MacaulayRow {
    /// Non-zero entries: (column index, coefficient), sorted by column.
    entries: Vec<(usize, f64)>,
    /// Source polynomial index.
    pub source_index: usize,
    /// Multiplier monomial applied to the source.
    pub multiplier: Monomial,
}

impl MacaulayRow {
    /// Creates a new row.
    #[must_use]
    pub fn new(entries: Vec<(usize, f64)>, source_index: usize, multiplier: Monomial) -> Self {
        Self {
            entries,
            source_index,
            multiplier,
        }
    }

    /// Returns the entries.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Returns the leading column (smallest index with a non-zero entry).
    #[must_use]
    pub fn leading_column(&self) -> Option<usize> {
        self.entries.first().map(|(col, _)| *col)
    }
}

/// The Macaulay matrix of a polynomial system.
#[derive(Clone, Debug)]
pub struct MacaulayMatrix {
    /// Rows of the matrix (generator multiples).
    pub rows: Vec<MacaulayRow>,
    /// Column ordering: column index -> monomial.
    pub columns: Vec<Monomial>,
    /// Inverse map: monomial -> column index.
    pub monomial_to_col: FxHashMap<Monomial, usize>,
    /// Target degree `D`.
    pub degree: u32,
    /// Basis shared by every generator.
    pub basis: Basis,
    /// Number of variables.
    pub num_vars: usize,
}

/// The Macaulay bound `sum(deg) - n_polys + 1`.
///
/// The bound is raised to the largest generator degree when it falls short,
/// so every generator contributes at least itself as a row.
#[must_use]
pub fn macaulay_degree(polys: &[Polynomial]) -> u32 {
    let total: i64 = polys.iter().map(|p| i64::from(p.degree())).sum();
    let bound = total - polys.len() as i64 + 1;
    let max_deg = polys.iter().map(Polynomial::degree).max().unwrap_or(0);
    u32::try_from(bound.max(0)).unwrap_or(u32::MAX).max(max_deg)
}

impl MacaulayMatrix {
    /// Builds the Macaulay matrix of `polys`.
    ///
    /// # Errors
    ///
    /// Fails on an empty system or when the generators disagree on basis or
    /// number of variables.
    pub fn construct(polys: &[Polynomial]) -> Result<Self> {
        let first = polys.first().ok_or(GroebnerError::EmptyInput)?;
        let num_vars = first.dim();
        let basis = first.basis();
        for p in polys {
            if p.basis() != basis {
                return Err(PolyError::BasisMismatch {
                    left: basis,
                    right: p.basis(),
                }
                .into());
            }
            if p.dim() != num_vars {
                return Err(PolyError::DimensionMismatch {
                    expected: num_vars,
                    found: p.dim(),
                }
                .into());
            }
        }

        let degree = macaulay_degree(polys);

        // Sort monomials by grevlex descending (highest first = column 0)
        let mut columns = monomials_up_to_degree(num_vars, degree);
        MonomialOrder::Grevlex.sort_descending(&mut columns);

        let monomial_to_col: FxHashMap<Monomial, usize> = columns
            .iter()
            .enumerate()
            .map(|(col, m)| (m.clone(), col))
            .collect();

        // Build rows in parallel
        let mut rows: Vec<MacaulayRow> = polys
            .par_iter()
            .enumerate()
            .map(|(poly_idx, poly)| {
                let span = degree.saturating_sub(poly.degree());
                monomials_up_to_degree(num_vars, span)
                    .into_iter()
                    .map(|mult| {
                        let product = poly.mon_mult(&mult)?;
                        let mut entries = Vec::with_capacity(product.num_terms());
                        for (m, c) in product.terms() {
                            let col = monomial_to_col
                                .get(&m)
                                .copied()
                                .ok_or_else(|| GroebnerError::MissingColumn(m.to_string()))?;
                            entries.push((col, c));
                        }
                        entries.sort_by_key(|&(col, _)| col);
                        Ok(MacaulayRow::new(entries, poly_idx, mult))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<Vec<_>>>>()?
            .into_iter()
            .flatten()
            .collect();

        rows.sort_by_key(|row| row.leading_column().unwrap_or(usize::MAX));

        debug!(
            rows = rows.len(),
            cols = columns.len(),
            degree,
            "built Macaulay matrix"
        );

        Ok(Self {
            rows,
            columns,
            monomial_to_col,
            degree,
            basis,
            num_vars,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column holding `m`.
    #[must_use]
    pub fn column_of(&self, m: &Monomial) -> Option<usize> {
        self.monomial_to_col.get(m).copied()
    }

    /// Column cuts `(c0, c1)` splitting the matrix into three blocks.
    ///
    /// Columns `0..c0` hold the monomials of degree exactly `D` (none when
    /// `D < 2`), columns `c1..` hold the constant and the single variables,
    /// and the middle block holds everything else.
    #[must_use]
    pub fn cuts(&self) -> (usize, usize) {
        let trailing = self.columns.iter().filter(|m| m.total_degree() <= 1).count();
        let c1 = self.columns.len() - trailing;
        let leading = if self.degree >= 2 {
            self.columns
                .iter()
                .filter(|m| m.total_degree() == self.degree)
                .count()
        } else {
            0
        };
        (leading.min(c1), c1)
    }

    /// Converts to a dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> DenseMatrix<f64> {
        let mut dense = DenseMatrix::zeros(self.num_rows(), self.num_cols());
        for (r, row) in self.rows.iter().enumerate() {
            for &(col, c) in row.entries() {
                dense[(r, col)] = c;
            }
        }
        dense
    }

    /// Turns row `r` of an echelonized copy of this matrix back into a
    /// polynomial.
    ///
    /// # Errors
    ///
    /// Propagates polynomial construction failures.
    pub fn row_polynomial(&self, dense: &DenseMatrix<f64>, r: usize) -> Result<Polynomial> {
        let terms = dense
            .row(r)
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(c, &v)| (self.columns[c].clone(), v));
        Ok(Polynomial::from_terms(self.basis, self.num_vars, terms)?)
    }
}

/// Groebner basis read off the reduced row echelon form of the Macaulay
/// matrix.
///
/// Rows whose leading monomial is divisible by another row's leading
/// monomial are discarded, leaving a minimal basis. Entries below
/// `zero_tol` are treated as zero.
///
/// # Errors
///
/// Fails under the same conditions as [`MacaulayMatrix::construct`].
pub fn macaulay_basis(polys: &[Polynomial], zero_tol: f64) -> Result<Vec<Polynomial>> {
    let mac = MacaulayMatrix::construct(polys)?;
    let mut dense = mac.to_dense();
    let pivots = dense.rref_in_place(zero_tol);

    let leads: Vec<&Monomial> = pivots.iter().map(|&c| &mac.columns[c]).collect();
    let mut basis = Vec::new();
    for (r, lead) in leads.iter().enumerate() {
        let redundant = leads
            .iter()
            .enumerate()
            .any(|(j, other)| j != r && lead.is_divisible_by(other));
        if !redundant {
            basis.push(mac.row_polynomial(&dense, r)?);
        }
    }

    debug!(rank = pivots.len(), kept = basis.len(), "Macaulay basis");
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(num_vars: usize, terms: &[(&[u32], f64)]) -> Polynomial {
        Polynomial::from_terms(
            Basis::Power,
            num_vars,
            terms.iter().map(|&(e, c)| (Monomial::new(e), c)),
        )
        .unwrap()
    }

    fn decoupled_quadratics() -> Vec<Polynomial> {
        vec![
            poly(2, &[(&[2, 0], 1.0), (&[0, 0], -1.0)]),
            poly(2, &[(&[0, 2], 1.0), (&[0, 0], -4.0)]),
        ]
    }

    #[test]
    fn test_degree_bound() {
        let polys = decoupled_quadratics();
        assert_eq!(macaulay_degree(&polys), 3);

        // a lone constant keeps degree zero
        let one = vec![Polynomial::constant(Basis::Power, 1, 1.0)];
        assert_eq!(macaulay_degree(&one), 0);

        // bound below a generator degree is raised
        let mixed = vec![
            poly(1, &[(&[3], 1.0)]),
            Polynomial::constant(Basis::Power, 1, 1.0),
        ];
        assert_eq!(macaulay_degree(&mixed), 3);
    }

    #[test]
    fn test_construct_shape_and_order() {
        let mac = MacaulayMatrix::construct(&decoupled_quadratics()).unwrap();
        assert_eq!(mac.degree, 3);
        assert_eq!(mac.num_cols(), 10);
        assert_eq!(mac.num_rows(), 6);
        assert_eq!(mac.columns[0], Monomial::new(&[3, 0]));
        assert!(mac.columns[9].is_one());

        let leading: Vec<usize> = mac.rows.iter().filter_map(MacaulayRow::leading_column).collect();
        assert!(leading.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(mac.column_of(&Monomial::new(&[1, 1])), Some(5));
    }

    #[test]
    fn test_cuts() {
        let mac = MacaulayMatrix::construct(&decoupled_quadratics()).unwrap();
        assert_eq!(mac.cuts(), (4, 7));

        let one = MacaulayMatrix::construct(&[Polynomial::constant(Basis::Power, 1, 1.0)]).unwrap();
        assert_eq!(one.cuts(), (0, 0));

        let quad = MacaulayMatrix::construct(&[poly(1, &[(&[2], 1.0), (&[0], -1.0)])]).unwrap();
        assert_eq!(quad.cuts(), (1, 1));
    }

    #[test]
    fn test_construct_rejects_mixed_input() {
        assert_eq!(
            MacaulayMatrix::construct(&[]).unwrap_err(),
            GroebnerError::EmptyInput
        );

        let polys = vec![
            poly(2, &[(&[1, 0], 1.0)]),
            poly(3, &[(&[0, 1, 0], 1.0)]),
        ];
        assert!(matches!(
            MacaulayMatrix::construct(&polys),
            Err(GroebnerError::Poly(PolyError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_macaulay_basis_decoupled() {
        let gb = macaulay_basis(&decoupled_quadratics(), 1e-10).unwrap();
        let mut leads: Vec<Monomial> = gb.iter().filter_map(|g| g.lead_term().cloned()).collect();
        MonomialOrder::Grevlex.sort_descending(&mut leads);
        assert_eq!(leads, vec![Monomial::new(&[2, 0]), Monomial::new(&[0, 2])]);
        for g in &gb {
            assert!((g.lead_coeff() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macaulay_basis_linear() {
        // x - 2, y - 3
        let polys = vec![
            poly(2, &[(&[1, 0], 1.0), (&[0, 0], -2.0)]),
            poly(2, &[(&[0, 1], 1.0), (&[0, 0], -3.0)]),
        ];
        let gb = macaulay_basis(&polys, 1e-10).unwrap();
        assert_eq!(gb.len(), 2);
        let x = gb.iter().find(|g| g.lead_term() == Some(&Monomial::new(&[1, 0]))).unwrap();
        assert!((x.coeff(&Monomial::new(&[0, 0])) + 2.0).abs() < 1e-12);
    }
}
