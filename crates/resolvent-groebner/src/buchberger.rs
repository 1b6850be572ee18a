//! Buchberger's algorithm over floating-point coefficients.
//!
//! Pairs are processed smallest lcm first (the normal strategy). Every
//! intermediate result has coefficients below the zero tolerance snapped to
//! zero, and new basis elements are made monic. The final basis is minimal
//! and interreduced.

use rustc_hash::FxHashSet;
use tracing::debug;

use resolvent_poly::{cmp_grevlex, Basis, Monomial, Polynomial};

use crate::criteria::{chain_criterion, product_criterion};
use crate::error::{GroebnerError, Result};
use crate::reduce::{normal_form, s_polynomial};

/// Configuration for Buchberger's algorithm.
#[derive(Clone, Debug)]
pub struct BuchbergerConfig {
    /// Coefficients with smaller magnitude are treated as zero.
    pub zero_tol: f64,
    /// Maximum number of S-pairs to examine before giving up.
    pub max_pairs: usize,
    /// Whether to apply the product and chain criteria (power basis only).
    pub use_criteria: bool,
}

impl Default for BuchbergerConfig {
    fn default() -> Self {
        Self {
            zero_tol: 1e-10,
            max_pairs: 10_000,
            use_criteria: true,
        }
    }
}

#[derive(Clone, Debug)]
struct Pair {
    i: usize,
    j: usize,
    lcm: Monomial,
}

/// Buchberger state: the growing basis and its pending pairs.
pub struct Buchberger {
    /// Current basis, every element monic.
    basis: Vec<Polynomial>,
    /// Leading monomials of `basis`, index-aligned.
    leads: Vec<Monomial>,
    /// Pending pairs to process.
    pairs: Vec<Pair>,
    /// Processed pairs (for the chain criterion).
    processed: FxHashSet<(usize, usize)>,
    /// Configuration.
    config: BuchbergerConfig,
    /// Pairs examined so far.
    examined: usize,
}

impl Buchberger {
    /// Creates a new instance from generators. Zero generators are dropped.
    #[must_use]
    pub fn new(generators: &[Polynomial], config: BuchbergerConfig) -> Self {
        let mut state = Self {
            basis: Vec::new(),
            leads: Vec::new(),
            pairs: Vec::new(),
            processed: FxHashSet::default(),
            config,
            examined: 0,
        };
        for g in generators {
            let mut g = g.clone();
            g.snap_zeros(state.config.zero_tol);
            if !g.is_zero() {
                state.push(g.monic());
            }
        }
        state
    }

    fn push(&mut self, poly: Polynomial) {
        let Some(lead) = poly.lead_term().cloned() else {
            return;
        };
        let k = self.basis.len();
        for (i, lead_i) in self.leads.iter().enumerate() {
            self.pairs.push(Pair {
                i,
                j: k,
                lcm: lead_i.lcm(&lead),
            });
        }
        self.basis.push(poly);
        self.leads.push(lead);
    }

    fn criteria_apply(&self) -> bool {
        self.config.use_criteria && self.basis.first().map(Polynomial::basis) == Some(Basis::Power)
    }

    fn next_pair(&mut self) -> Option<Pair> {
        let best = self
            .pairs
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| cmp_grevlex(&a.lcm, &b.lcm))
            .map(|(idx, _)| idx)?;
        Some(self.pairs.swap_remove(best))
    }

    /// Runs the algorithm to completion.
    ///
    /// # Errors
    ///
    /// Fails if the pair budget is exhausted or polynomial arithmetic fails.
    pub fn compute(mut self) -> Result<Vec<Polynomial>> {
        let use_criteria = self.criteria_apply();

        while let Some(pair) = self.next_pair() {
            self.examined += 1;
            if self.examined > self.config.max_pairs {
                return Err(GroebnerError::PairLimit {
                    limit: self.config.max_pairs,
                });
            }

            let skip = use_criteria
                && (product_criterion(&self.leads[pair.i], &self.leads[pair.j])
                    || chain_criterion(pair.i, pair.j, &pair.lcm, &self.leads, &self.processed));
            self.processed.insert((pair.i, pair.j));
            if skip {
                continue;
            }

            let s = s_polynomial(&self.basis[pair.i], &self.basis[pair.j])?;
            let r = normal_form(&s, &self.basis, self.config.zero_tol)?;
            if !r.is_zero() {
                debug!(lead = ?r.lead_term(), size = self.basis.len() + 1, "new basis element");
                self.push(r.monic());
            }
        }

        debug!(pairs = self.examined, size = self.basis.len(), "Buchberger done");
        minimal_reduced(self.basis, self.config.zero_tol)
    }
}

/// Drops elements whose leading monomial is divisible by another's and
/// reduces every tail by the survivors.
fn minimal_reduced(basis: Vec<Polynomial>, tol: f64) -> Result<Vec<Polynomial>> {
    let mut minimal: Vec<Polynomial> = Vec::new();
    for (i, g) in basis.iter().enumerate() {
        let Some(lt) = g.lead_term() else { continue };
        let redundant = basis.iter().enumerate().any(|(j, h)| {
            h.lead_term().is_some_and(|lh| {
                // equal leaders: keep the first occurrence
                lt.is_divisible_by(lh) && (lt != lh || j < i)
            }) && j != i
        });
        if !redundant {
            minimal.push(g.clone());
        }
    }

    let mut reduced = Vec::with_capacity(minimal.len());
    for i in 0..minimal.len() {
        let g = &minimal[i];
        let Some(lt) = g.lead_term().cloned() else { continue };
        let others: Vec<Polynomial> = minimal
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, h)| h.clone())
            .collect();

        let mut tail = g.clone();
        let lc = tail.remove_term(&lt);
        let tail = normal_form(&tail, &others, tol)?;
        let head = Polynomial::from_terms(g.basis(), g.dim(), [(lt, lc)])?;
        reduced.push(head.add(&tail)?.monic());
    }
    Ok(reduced)
}

/// Computes a reduced Groebner basis of `generators` in grevlex order.
///
/// # Errors
///
/// Fails if the pair budget is exhausted or polynomial arithmetic fails.
pub fn groebner_basis(generators: &[Polynomial], config: &BuchbergerConfig) -> Result<Vec<Polynomial>> {
    Buchberger::new(generators, config.clone()).compute()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(basis: Basis, terms: &[(&[u32], f64)]) -> Polynomial {
        Polynomial::from_terms(
            basis,
            2,
            terms.iter().map(|&(e, c)| (Monomial::new(e), c)),
        )
        .unwrap()
    }

    fn leads(gb: &[Polynomial]) -> Vec<Monomial> {
        let mut out: Vec<Monomial> = gb.iter().filter_map(|g| g.lead_term().cloned()).collect();
        out.sort_by(|a, b| cmp_grevlex(b, a));
        out
    }

    #[test]
    fn test_circle_and_line() {
        let f = poly(Basis::Power, &[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]);
        let g = poly(Basis::Power, &[(&[1, 0], 1.0), (&[0, 1], -1.0), (&[0, 0], 1.0)]);
        let gb = groebner_basis(&[f, g], &BuchbergerConfig::default()).unwrap();

        assert_eq!(leads(&gb), vec![Monomial::new(&[0, 2]), Monomial::new(&[1, 0])]);
        let quad = gb.iter().find(|p| p.degree() == 2).unwrap();
        // y^2 - y - 2
        assert!((quad.coeff(&Monomial::new(&[0, 1])) + 1.0).abs() < 1e-12);
        assert!((quad.coeff(&Monomial::new(&[0, 0])) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_circle_and_hyperbola() {
        // x^2 + y^2 - 5, x*y - 2
        let f = poly(Basis::Power, &[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]);
        let g = poly(Basis::Power, &[(&[1, 1], 1.0), (&[0, 0], -2.0)]);
        let gb = groebner_basis(&[f, g], &BuchbergerConfig::default()).unwrap();
        assert_eq!(
            leads(&gb),
            vec![
                Monomial::new(&[0, 3]),
                Monomial::new(&[2, 0]),
                Monomial::new(&[1, 1]),
            ]
        );
    }

    #[test]
    fn test_inconsistent_system_gives_one() {
        // x - 1, x - 2
        let f = poly(Basis::Power, &[(&[1, 0], 1.0), (&[0, 0], -1.0)]);
        let g = poly(Basis::Power, &[(&[1, 0], 1.0), (&[0, 0], -2.0)]);
        let gb = groebner_basis(&[f, g], &BuchbergerConfig::default()).unwrap();
        assert_eq!(gb.len(), 1);
        assert!(gb[0].is_constant());
    }

    #[test]
    fn test_chebyshev_linear() {
        let f = poly(Basis::Chebyshev, &[(&[1, 0], 2.0), (&[0, 0], -1.0)]);
        let g = poly(Basis::Chebyshev, &[(&[0, 1], 1.0), (&[0, 0], 0.25)]);
        let gb = groebner_basis(&[f, g], &BuchbergerConfig::default()).unwrap();
        assert_eq!(gb.len(), 2);
        let x = gb.iter().find(|p| p.lead_term() == Some(&Monomial::new(&[1, 0]))).unwrap();
        assert!((x.coeff(&Monomial::new(&[0, 0])) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pair_limit() {
        let f = poly(Basis::Power, &[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]);
        let g = poly(Basis::Power, &[(&[1, 1], 1.0), (&[0, 0], -2.0)]);
        let config = BuchbergerConfig {
            max_pairs: 0,
            ..BuchbergerConfig::default()
        };
        assert_eq!(
            groebner_basis(&[f, g], &config),
            Err(GroebnerError::PairLimit { limit: 0 })
        );
    }
}
