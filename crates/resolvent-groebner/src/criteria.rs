//! Buchberger criteria for discarding S-pairs.
//!
//! Both criteria rely on the multiplicative structure of the power basis.
//! Callers skip them for Chebyshev-basis input, where a product of basis
//! elements expands into several terms.

use rustc_hash::FxHashSet;

use resolvent_poly::Monomial;

/// Checks Buchberger's first criterion (product criterion).
///
/// If the leading monomials are coprime, S(f, g) reduces to zero.
#[must_use]
pub fn product_criterion(lm_f: &Monomial, lm_g: &Monomial) -> bool {
    lm_f.is_coprime(lm_g)
}

/// Checks the chain criterion (Buchberger's second criterion).
///
/// The pair `(i, j)` with leading-monomial lcm `lcm` is redundant if some
/// other basis element `k` has a leading monomial dividing `lcm` and the
/// pairs `(i, k)` and `(j, k)` have already been processed.
#[must_use]
pub fn chain_criterion(
    i: usize,
    j: usize,
    lcm: &Monomial,
    leads: &[Monomial],
    processed: &FxHashSet<(usize, usize)>,
) -> bool {
    let ordered = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };
    leads.iter().enumerate().any(|(k, lm_k)| {
        k != i
            && k != j
            && lcm.is_divisible_by(lm_k)
            && processed.contains(&ordered(i, k))
            && processed.contains(&ordered(j, k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_criterion() {
        let x2 = Monomial::new(&[2, 0]);
        let y3 = Monomial::new(&[0, 3]);
        let xy = Monomial::new(&[1, 1]);
        assert!(product_criterion(&x2, &y3));
        assert!(!product_criterion(&x2, &xy));
    }

    #[test]
    fn test_chain_criterion() {
        let leads = vec![
            Monomial::new(&[2, 0]),
            Monomial::new(&[0, 2]),
            Monomial::new(&[1, 1]),
        ];
        let lcm = leads[0].lcm(&leads[1]);
        let mut processed = FxHashSet::default();
        assert!(!chain_criterion(0, 1, &lcm, &leads, &processed));
        processed.insert((0, 2));
        processed.insert((1, 2));
        assert!(chain_criterion(0, 1, &lcm, &leads, &processed));
    }
}
