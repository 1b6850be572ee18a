//! Multiplication operators on the quotient ring.
//!
//! Column `i` of `m_f` is the coordinate vector of `f * b_i` with respect to
//! the vector space basis `b`. The coordinates come either from division by
//! a Groebner basis or from the relations `t = -X[r] * b` of a reduced
//! Macaulay matrix.

use std::ops::Range;

use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::debug;

use resolvent_groebner::reduce::reduce_lead;
use resolvent_linalg::DenseMatrix;
use resolvent_poly::{Basis, Monomial, Polynomial};

use crate::basis::VectorSpaceBasis;
use crate::error::{Result, RootError};
use crate::reducer::Reduction;

/// A random linear form `sum c_i x_i` with integer coefficients drawn from
/// `range`.
///
/// # Errors
///
/// Propagates polynomial construction failures.
pub fn generic_polynomial<R: Rng>(
    basis: Basis,
    num_vars: usize,
    range: &Range<u32>,
    rng: &mut R,
) -> Result<Polynomial> {
    let terms: Vec<(Monomial, f64)> = (0..num_vars)
        .map(|i| {
            let c = rng.gen_range(range.clone());
            (Monomial::var(i, num_vars), f64::from(c))
        })
        .collect();
    Ok(Polynomial::from_terms(basis, num_vars, terms)?)
}

/// Orders divisors by decreasing [`Polynomial::lead_ratio`].
#[must_use]
pub fn sorted_by_lead_ratio(gb: &[Polynomial]) -> Vec<Polynomial> {
    let mut sorted = gb.to_vec();
    sorted.sort_by(|a, b| b.lead_ratio().total_cmp(&a.lead_ratio()));
    sorted
}

/// Coordinates of `p` modulo `divisors` in the basis `vb`.
///
/// Terms already in the basis leave the remainder as soon as they appear;
/// every other leading term is reduced by the first divisor whose leading
/// monomial divides it.
///
/// # Errors
///
/// Returns [`RootError::DivisionFailure`] if a term outside the basis has no
/// divisor.
pub fn coordinate_vector(
    p: &Polynomial,
    divisors: &[Polynomial],
    vb: &VectorSpaceBasis,
    tol: f64,
) -> Result<Vec<f64>> {
    let mut coords = vec![0.0; vb.len()];
    let mut current = p.clone();
    current.snap_zeros(tol);

    loop {
        for (m, c) in current.drain_terms(|m| vb.contains(m)) {
            if let Some(pos) = vb.position(&m) {
                coords[pos] += c;
            }
        }
        let Some(lt) = current.lead_term().cloned() else {
            break;
        };
        let divisor = divisors
            .iter()
            .find(|d| d.lead_term().is_some_and(|l| lt.is_divisible_by(l)))
            .ok_or_else(|| RootError::DivisionFailure(format!("no divisor for {lt}")))?;
        current = reduce_lead(&current, divisor, tol)?;
    }
    Ok(coords)
}

/// The multiplication matrix of `f` built by division by `gb`.
///
/// # Errors
///
/// Fails if some product cannot be reduced into the basis.
pub fn mult_matrix(
    f: &Polynomial,
    gb: &[Polynomial],
    vb: &VectorSpaceBasis,
    tol: f64,
) -> Result<DenseMatrix<f64>> {
    let divisors = sorted_by_lead_ratio(gb);
    let n = vb.len();
    let mut m = DenseMatrix::zeros(n, n);
    for (i, b) in vb.monomials().iter().enumerate() {
        let product = f.mon_mult(b)?;
        let coords = coordinate_vector(&product, &divisors, vb, tol)?;
        m.set_col(i, &coords);
    }
    debug!(size = n, "multiplication matrix from Groebner basis");
    Ok(m)
}

/// The multiplication matrix of `f` read off a reduced Macaulay matrix.
///
/// `order` is the map returned by [`VectorSpaceBasis::from_reduction`].
///
/// # Errors
///
/// Returns [`RootError::DivisionFailure`] if a product has a term that is
/// neither a basis monomial nor eliminated by the reduction.
pub fn tvb_mult_matrix(
    f: &Polynomial,
    reduction: &Reduction,
    vb: &VectorSpaceBasis,
    order: &[usize],
) -> Result<DenseMatrix<f64>> {
    let eliminated: FxHashMap<&Monomial, usize> = reduction
        .eliminated()
        .iter()
        .enumerate()
        .map(|(r, m)| (m, r))
        .collect();

    let n = vb.len();
    let mut m = DenseMatrix::zeros(n, n);
    for (i, b) in vb.monomials().iter().enumerate() {
        let product = f.mon_mult(b)?;
        for (t, c) in product.terms() {
            if let Some(k) = vb.position(&t) {
                m[(k, i)] += c;
            } else if let Some(&r) = eliminated.get(&t) {
                for (j, &col) in order.iter().enumerate() {
                    m[(j, i)] -= c * reduction.relation(r, col);
                }
            } else {
                return Err(RootError::DivisionFailure(format!(
                    "{t} is outside the reduced Macaulay matrix"
                )));
            }
        }
    }
    debug!(size = n, "multiplication matrix from reduced Macaulay matrix");
    Ok(m)
}
