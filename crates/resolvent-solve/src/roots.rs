//! Roots from the eigenvectors of a multiplication matrix.
//!
//! The eigenvectors of `m_f^T` are, up to scale, evaluations of the basis
//! monomials at the common roots. Dividing by the constant coordinate
//! fixes the scale; the coordinates of the single variables are then the
//! root itself.

use num_complex::Complex64;
use num_traits::Zero;
use tracing::{debug, warn};

use resolvent_linalg::{eig, DenseMatrix};
use resolvent_poly::{Monomial, Polynomial};

use crate::basis::VectorSpaceBasis;
use crate::config::SolverConfig;
use crate::error::{Result, RootError};

/// A common root, one complex coordinate per variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Root(pub Vec<Complex64>);

impl Root {
    /// Creates a root from real coordinates.
    #[must_use]
    pub fn from_real(coords: &[f64]) -> Self {
        Self(coords.iter().map(|&x| Complex64::new(x, 0.0)).collect())
    }

    /// The coordinates.
    #[must_use]
    pub fn coords(&self) -> &[Complex64] {
        &self.0
    }

    /// Number of coordinates.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Checks if every imaginary part is below `tol` in magnitude.
    #[must_use]
    pub fn is_real(&self, tol: f64) -> bool {
        self.0.iter().all(|z| z.im.abs() < tol)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &[Complex64]) -> f64 {
        self.0
            .iter()
            .zip(other)
            .map(|(a, b)| (a - b).norm_sqr())
            .sum::<f64>()
            .sqrt()
    }
}

/// Assigns variables that left the basis from the Groebner element whose
/// leading term is that variable, visiting them in the order given.
fn resolve_in_order(
    root: &mut [Complex64],
    vars: impl Iterator<Item = usize>,
    gb: &[Polynomial],
) -> Result<()> {
    let n = root.len();
    for i in vars {
        let x_i = Monomial::var(i, n);
        let g = gb
            .iter()
            .find(|g| g.lead_term() == Some(&x_i))
            .ok_or_else(|| RootError::Unsupported(format!("no basis element with leading term {x_i}")))?;
        root[i] = Complex64::zero();
        let tail = g.evaluate_at(root)?;
        root[i] = -tail / g.lead_coeff();
    }
    Ok(())
}

/// Fills in the variables missing from the basis.
///
/// A variable outside the basis is linear in the variables after it, so
/// they are resolved from the highest index down.
///
/// # Errors
///
/// Returns [`RootError::Unsupported`] if some variable is not the leading
/// term of a Groebner element.
pub fn resolve_missing(root: &mut [Complex64], missing: &[usize], gb: &[Polynomial]) -> Result<()> {
    resolve_in_order(root, missing.iter().rev().copied(), gb)
}

/// Recovers the roots encoded by a multiplication matrix.
///
/// `gb` is needed only when some variable is missing from the basis.
///
/// # Errors
///
/// Returns [`RootError::Unsupported`] if the constant is not a basis
/// monomial, or a variable is missing and no Groebner basis is given.
/// Eigen-solver failures are propagated.
pub fn recover_roots(
    m_f: &DenseMatrix<f64>,
    vb: &VectorSpaceBasis,
    gb: Option<&[Polynomial]>,
    config: &SolverConfig,
) -> Result<Vec<Root>> {
    let var_dict = vb.var_dict();
    let constant = var_dict
        .constant()
        .ok_or_else(|| RootError::Unsupported("the constant monomial left the basis".into()))?;
    let missing = var_dict.missing_variables();
    if !missing.is_empty() && gb.is_none() {
        return Err(RootError::Unsupported(format!(
            "variables {missing:?} are not in the basis"
        )));
    }

    let eigen = eig(&m_f.transpose(), &config.eig)?;
    let n = var_dict.num_vars();
    let mut roots = Vec::with_capacity(vb.len());

    for k in 0..eigen.values.len() {
        let v = eigen.vector(k);
        let scale = v[constant];
        if scale.norm() <= config.zero_tol {
            warn!(eigenvalue = %eigen.values[k], "skipping eigenvector with vanishing constant coordinate");
            continue;
        }

        let mut root = vec![Complex64::zero(); n];
        for (i, slot) in root.iter_mut().enumerate() {
            if let Some(pos) = var_dict.variable(i) {
                *slot = v[pos] / scale;
            }
        }
        if let Some(gb) = gb {
            resolve_missing(&mut root, &missing, gb)?;
        }
        roots.push(Root(root));
    }

    debug!(roots = roots.len(), basis = vb.len(), "recovered roots");
    Ok(roots)
}
