//! Property-based tests for the root-finding pipeline.

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use proptest::prelude::*;

    use resolvent_linalg::DenseMatrix;
    use resolvent_poly::{Basis, Monomial, Polynomial};

    use crate::basis::VectorSpaceBasis;
    use crate::config::{Method, ReductionStrategy, SolverConfig};
    use crate::reducer::Reducer;
    use crate::solver::{find_roots, residuals};

    fn power(terms: &[(&[u32], f64)]) -> Polynomial {
        Polynomial::from_terms(
            Basis::Power,
            2,
            terms.iter().map(|&(e, c)| (Monomial::new(e), c)),
        )
        .unwrap()
    }

    // (x - a1)(x - a2), (y - b1)(y - b2)
    fn product_system(a1: i32, a2: i32, b1: i32, b2: i32) -> Vec<Polynomial> {
        let (a1, a2, b1, b2) = (f64::from(a1), f64::from(a2), f64::from(b1), f64::from(b2));
        vec![
            power(&[(&[2, 0], 1.0), (&[1, 0], -(a1 + a2)), (&[0, 0], a1 * a2)]),
            power(&[(&[0, 2], 1.0), (&[0, 1], -(b1 + b2)), (&[0, 0], b1 * b2)]),
        ]
    }

    fn near(root: &[Complex64], x: f64, y: f64, tol: f64) -> bool {
        (root[0] - Complex64::new(x, 0.0)).norm() < tol && (root[1] - Complex64::new(y, 0.0)).norm() < tol
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn product_systems_recover_every_root(
            a1 in -4i32..=4, a2 in -4i32..=4, b1 in -4i32..=4, b2 in -4i32..=4,
            method in prop_oneof![Just(Method::Groebner), Just(Method::Macaulay), Just(Method::Tvb)],
        ) {
            prop_assume!(a1 != a2 && b1 != b2);
            // with f = x + y every root needs its own eigenvalue
            prop_assume!(a1 - a2 != b2 - b1 && a1 - a2 != b1 - b2);

            let polys = product_system(a1, a2, b1, b2);
            let config = SolverConfig {
                coeff_range: 1..2,
                ..SolverConfig::default()
            };
            let solutions = find_roots(&polys, method, &config).unwrap();
            let roots = solutions.roots();
            prop_assert_eq!(roots.len(), 4);
            for (x, y) in [(a1, b1), (a1, b2), (a2, b1), (a2, b2)] {
                let (x, y) = (f64::from(x), f64::from(y));
                prop_assert!(roots.iter().any(|r| near(r.coords(), x, y, 1e-7)));
            }
        }

        #[test]
        fn linear_systems_have_their_unique_root(
            a in -5i32..=5, b in -5i32..=5, c in -5i32..=5, d in -5i32..=5,
            e in -9i32..=9, f in -9i32..=9,
        ) {
            prop_assume!(a * d - b * c != 0);
            let (af, bf, cf, df) = (f64::from(a), f64::from(b), f64::from(c), f64::from(d));
            let (ef, ff) = (f64::from(e), f64::from(f));
            let polys = vec![
                power(&[(&[1, 0], af), (&[0, 1], bf), (&[0, 0], -ef)]),
                power(&[(&[1, 0], cf), (&[0, 1], df), (&[0, 0], -ff)]),
            ];
            let det = af * df - bf * cf;
            let x = (ef * df - bf * ff) / det;
            let y = (af * ff - ef * cf) / det;

            let solutions = find_roots(&polys, Method::Groebner, &SolverConfig::default().with_seed(5)).unwrap();
            prop_assert_eq!(solutions.roots().len(), 1);
            prop_assert!(near(solutions.roots()[0].coords(), x, y, 1e-8));
            for r in residuals(&polys, &solutions.roots()[0]).unwrap() {
                prop_assert!(r < 1e-8);
            }
        }

        #[test]
        fn standard_monomials_avoid_every_lead(p in 1u32..5, q in 1u32..5, k in 1u32..4) {
            // leads x^p, y^q, x y^k
            let gb = vec![
                power(&[(&[p, 0], 1.0)]),
                power(&[(&[0, q], 1.0)]),
                power(&[(&[1, k], 1.0)]),
            ];
            let vb = VectorSpaceBasis::from_groebner(&gb, 2);
            let leads: Vec<&Monomial> = gb.iter().filter_map(Polynomial::lead_term).collect();
            for m in vb.monomials() {
                prop_assert!(leads.iter().all(|l| !m.is_divisible_by(l)));
            }
            for w in vb.monomials().windows(2) {
                prop_assert!(resolvent_poly::cmp_grevlex(&w[0], &w[1]).is_lt());
            }
            // the constant always survives and sorts first
            prop_assert_eq!(vb.var_dict().constant(), Some(0));
            let expected = q + (p - 1) * k.min(q);
            prop_assert_eq!(vb.len(), expected as usize);
        }

        #[test]
        fn reduced_form_is_a_fixed_point(
            x in proptest::collection::vec(-10.0f64..10.0, 6),
            schur in any::<bool>(),
        ) {
            let mut rows = vec![vec![0.0; 5]; 2];
            for i in 0..2 {
                rows[i][i] = 1.0;
                rows[i][2..].copy_from_slice(&x[3 * i..3 * i + 3]);
            }
            let m = DenseMatrix::from_rows(rows);
            let labels: Vec<Monomial> = (0..5u32).rev().map(|e| Monomial::new(&[e])).collect();
            let strategy = if schur { ReductionStrategy::SchurComplement } else { ReductionStrategy::Orthogonal };

            let r = Reducer::new(strategy, 1e-10, 1e-10).reduce(m.clone(), &labels, (0, 0)).unwrap();
            prop_assert_eq!(r.matrix, m);
            prop_assert_eq!(r.labels, labels);
        }
    }
}
