//! Property-based tests for monomials and polynomials.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use num_complex::Complex64;
    use proptest::prelude::*;

    use crate::monomial::{cmp_grevlex, Monomial};
    use crate::polynomial::{Basis, Polynomial};

    fn small_monomial() -> impl Strategy<Value = Monomial> {
        proptest::collection::vec(0u32..4, 2).prop_map(|e| Monomial::new(&e))
    }

    fn any_basis() -> impl Strategy<Value = Basis> {
        prop_oneof![Just(Basis::Power), Just(Basis::Chebyshev)]
    }

    // Polynomials in two variables with small integer coefficients.
    fn small_poly() -> impl Strategy<Value = Polynomial> {
        (any_basis(), 1usize..4, 1usize..4)
            .prop_flat_map(|(basis, a, b)| {
                proptest::collection::vec(-5i32..=5, a * b).prop_map(move |cs| {
                    let coeffs = cs.into_iter().map(f64::from).collect();
                    Polynomial::new(basis, &[a, b], coeffs).unwrap()
                })
            })
    }

    fn unit_point() -> impl Strategy<Value = [Complex64; 2]> {
        (-1.0f64..1.0, -1.0f64..1.0).prop_map(|(x, y)| [Complex64::new(x, 0.0), Complex64::new(y, 0.0)])
    }

    fn basis_element(basis: Basis, m: &Monomial) -> Polynomial {
        Polynomial::from_terms(basis, m.num_vars(), [(m.clone(), 1.0)]).unwrap()
    }

    proptest! {
        #[test]
        fn grevlex_is_antisymmetric(a in small_monomial(), b in small_monomial()) {
            prop_assert_eq!(cmp_grevlex(&a, &b), cmp_grevlex(&b, &a).reverse());
        }

        #[test]
        fn grevlex_respects_multiplication(
            a in small_monomial(),
            b in small_monomial(),
            c in small_monomial(),
        ) {
            if cmp_grevlex(&a, &b) == Ordering::Greater {
                prop_assert_eq!(cmp_grevlex(&a.mul(&c), &b.mul(&c)), Ordering::Greater);
            }
        }

        #[test]
        fn monomial_mul_then_div(a in small_monomial(), b in small_monomial()) {
            let ab = a.mul(&b);
            prop_assert!(ab.is_divisible_by(&a));
            prop_assert_eq!(ab.div(&b), Some(a));
        }

        #[test]
        fn lcm_is_divisible_by_both(a in small_monomial(), b in small_monomial()) {
            let l = a.lcm(&b);
            prop_assert!(l.is_divisible_by(&a) && l.is_divisible_by(&b));
            prop_assert_eq!(l.total_degree() + a.gcd(&b).total_degree(), a.total_degree() + b.total_degree());
        }

        #[test]
        fn mon_mult_matches_pointwise_product(p in small_poly(), m in small_monomial(), x in unit_point()) {
            let q = p.mon_mult(&m).unwrap();
            let lhs = q.evaluate_at(&x).unwrap();
            let rhs = p.evaluate_at(&x).unwrap() * basis_element(p.basis(), &m).evaluate_at(&x).unwrap();
            prop_assert!((lhs - rhs).norm() < 1e-9 * (1.0 + rhs.norm()));
        }

        #[test]
        fn mon_mult_shifts_lead_term(p in small_poly(), m in small_monomial()) {
            prop_assume!(!p.is_zero());
            let q = p.mon_mult(&m).unwrap();
            let expected = p.lead_term().unwrap().mul(&m);
            prop_assert_eq!(q.lead_term(), Some(&expected));
        }

        #[test]
        fn sub_scaled_is_linear(p in small_poly(), x in unit_point(), k in -3.0f64..3.0) {
            let q = p.scale(0.5);
            let d = p.sub_scaled(&q, k).unwrap();
            let expected = p.evaluate_at(&x).unwrap() * (1.0 - 0.5 * k);
            prop_assert!((d.evaluate_at(&x).unwrap() - expected).norm() < 1e-9);
        }

        #[test]
        fn promote_preserves_values(p in small_poly(), x in unit_point(), z in -1.0f64..1.0) {
            let q = p.promote(3).unwrap();
            let point = [x[0], x[1], Complex64::new(z, 0.0)];
            prop_assert!((q.evaluate_at(&point).unwrap() - p.evaluate_at(&x).unwrap()).norm() < 1e-12);
        }
    }
}
