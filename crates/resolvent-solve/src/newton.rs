//! Newton refinement of approximate roots.

use num_complex::Complex64;
use tracing::{debug, warn};

use resolvent_linalg::{lu_solve, DenseMatrix, LinalgError};
use resolvent_poly::Polynomial;

use crate::config::SolverConfig;
use crate::error::{Result, RootError};
use crate::roots::Root;

/// Result of [`newton_polish`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewtonOutcome {
    /// The refined root.
    pub root: Root,
    /// Iterations performed, counting the one that met the tolerance.
    pub iterations: usize,
    /// Whether the step norm dropped below the tolerance.
    pub converged: bool,
}

/// Refines `root` with Newton's method on the square system `polys`.
///
/// Each step solves `J(x) d = -F(x)` and stops once `|d|` falls below
/// `config.newton_tol`.
///
/// # Errors
///
/// Returns [`RootError::NonSquareSystem`] unless there are as many
/// polynomials as coordinates, and [`RootError::SingularJacobian`] when a
/// step cannot be solved.
pub fn newton_polish(polys: &[Polynomial], root: &Root, config: &SolverConfig) -> Result<NewtonOutcome> {
    let n = root.dim();
    if polys.len() != n {
        return Err(RootError::NonSquareSystem {
            polys: polys.len(),
            vars: n,
        });
    }

    let mut x = root.coords().to_vec();
    for iteration in 0..config.newton_max_iter {
        let mut rhs = Vec::with_capacity(n);
        let mut jacobian = DenseMatrix::zeros(n, n);
        for (i, p) in polys.iter().enumerate() {
            rhs.push(-p.evaluate_at(&x)?);
            let grad = p.grad(&x)?;
            jacobian.row_mut(i).copy_from_slice(&grad);
        }

        let step = lu_solve(&jacobian, &rhs).map_err(|e| match e {
            LinalgError::Singular { .. } => RootError::SingularJacobian { iteration },
            other => other.into(),
        })?;
        for (xi, di) in x.iter_mut().zip(&step) {
            *xi += di;
        }

        let norm = step.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
        if norm < config.newton_tol {
            debug!(iterations = iteration + 1, step = norm, "Newton converged");
            return Ok(NewtonOutcome {
                root: Root(x),
                iterations: iteration + 1,
                converged: true,
            });
        }
    }

    warn!(max_iter = config.newton_max_iter, "Newton hit the iteration cap");
    Ok(NewtonOutcome {
        root: Root(x),
        iterations: config.newton_max_iter,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolvent_poly::{Basis, Monomial};

    fn poly(terms: &[(&[u32], f64)]) -> Polynomial {
        Polynomial::from_terms(
            Basis::Power,
            2,
            terms.iter().map(|&(e, c)| (Monomial::new(e), c)),
        )
        .unwrap()
    }

    fn circle_and_line() -> Vec<Polynomial> {
        vec![
            poly(&[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]),
            poly(&[(&[1, 0], 1.0), (&[0, 1], -1.0), (&[0, 0], 1.0)]),
        ]
    }

    #[test]
    fn test_exact_root_takes_one_step() {
        let out = newton_polish(&circle_and_line(), &Root::from_real(&[1.0, 2.0]), &SolverConfig::default())
            .unwrap();
        assert!(out.converged);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.root, Root::from_real(&[1.0, 2.0]));
    }

    #[test]
    fn test_converges_from_nearby_guess() {
        let out = newton_polish(&circle_and_line(), &Root::from_real(&[1.2, 1.9]), &SolverConfig::default())
            .unwrap();
        assert!(out.converged);
        assert!(out.iterations > 1);
        assert!(out.root.distance(Root::from_real(&[1.0, 2.0]).coords()) < 1e-8);
    }

    #[test]
    fn test_singular_jacobian() {
        let polys = vec![poly(&[(&[2, 0], 1.0)]), poly(&[(&[0, 2], 1.0)])];
        assert_eq!(
            newton_polish(&polys, &Root::from_real(&[0.0, 0.0]), &SolverConfig::default()),
            Err(RootError::SingularJacobian { iteration: 0 })
        );
    }

    #[test]
    fn test_non_square_system() {
        let polys = circle_and_line();
        assert_eq!(
            newton_polish(&polys[..1], &Root::from_real(&[1.0, 2.0]), &SolverConfig::default()),
            Err(RootError::NonSquareSystem { polys: 1, vars: 2 })
        );
    }
}
