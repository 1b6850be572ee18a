//! The root-finding pipeline.
//!
//! ```text
//! polynomials -> Groebner basis | reduced Macaulay matrix
//!             -> vector space basis -> m_f -> eigenvectors -> roots
//! ```

use rayon::prelude::*;
use tracing::{debug, debug_span};

use resolvent_groebner::{groebner_basis, macaulay_basis, MacaulayMatrix};
use resolvent_poly::{Basis, Polynomial};

use crate::basis::{classify_ideal, IdealStatus, VectorSpaceBasis};
use crate::config::{Method, SolverConfig};
use crate::error::{Result, RootError};
use crate::multiplication::{generic_polynomial, mult_matrix, tvb_mult_matrix};
use crate::newton::newton_polish;
use crate::reducer::Reducer;
use crate::roots::{recover_roots, Root};

/// Outcome of a successful root-finding call.
#[derive(Clone, Debug, PartialEq)]
pub enum Solutions {
    /// The common roots, one per eigenvector kept.
    Roots(Vec<Root>),
    /// The polynomials generate the whole ring.
    NoSolutions,
}

impl Solutions {
    /// The roots found; empty for [`Solutions::NoSolutions`].
    #[must_use]
    pub fn roots(&self) -> &[Root] {
        match self {
            Solutions::Roots(roots) => roots,
            Solutions::NoSolutions => &[],
        }
    }

    /// Checks for [`Solutions::NoSolutions`].
    #[must_use]
    pub fn is_no_solutions(&self) -> bool {
        matches!(self, Solutions::NoSolutions)
    }
}

/// Checks the basis, pads every polynomial to a common number of variables
/// and drops zero polynomials.
fn prepare(polys: &[Polynomial]) -> Result<(Vec<Polynomial>, Basis, usize)> {
    let first = polys.first().ok_or(RootError::EmptySystem)?;
    let basis = first.basis();
    if let Some(other) = polys.iter().map(Polynomial::basis).find(|&b| b != basis) {
        return Err(RootError::TypeMismatch { first: basis, other });
    }

    let num_vars = polys.iter().map(Polynomial::dim).max().unwrap_or(0);
    let mut prepared = Vec::with_capacity(polys.len());
    for p in polys.iter().filter(|p| !p.is_zero()) {
        prepared.push(p.promote(num_vars)?);
    }
    if prepared.is_empty() {
        return Err(RootError::NotZeroDimensional);
    }
    Ok((prepared, basis, num_vars))
}

fn roots_from_groebner(gb: &[Polynomial], basis: Basis, num_vars: usize, config: &SolverConfig) -> Result<Solutions> {
    match classify_ideal(gb, num_vars) {
        IdealStatus::NoSolutions => return Ok(Solutions::NoSolutions),
        IdealStatus::NotZeroDimensional => return Err(RootError::NotZeroDimensional),
        IdealStatus::ZeroDimensional => {}
    }

    let vb = VectorSpaceBasis::from_groebner(gb, num_vars);
    let f = generic_polynomial(basis, num_vars, &config.coeff_range, &mut config.rng())?;
    let m_f = mult_matrix(&f, gb, &vb, config.zero_tol)?;
    Ok(Solutions::Roots(recover_roots(&m_f, &vb, Some(gb), config)?))
}

fn roots_from_reduction(polys: &[Polynomial], basis: Basis, num_vars: usize, config: &SolverConfig) -> Result<Solutions> {
    if polys.iter().any(Polynomial::is_constant) {
        return Ok(Solutions::NoSolutions);
    }
    if polys.len() < num_vars {
        return Err(RootError::NotZeroDimensional);
    }

    let mac = MacaulayMatrix::construct(polys)?;
    debug!(
        rows = mac.num_rows(),
        cols = mac.num_cols(),
        degree = mac.degree,
        "built Macaulay matrix"
    );
    let reduction = Reducer::from_config(config).reduce(mac.to_dense(), &mac.columns, mac.cuts())?;
    if reduction.remaining().is_empty() {
        return Ok(Solutions::NoSolutions);
    }

    let (vb, order) = VectorSpaceBasis::from_reduction(&reduction, num_vars);
    let var_dict = vb.var_dict();
    if var_dict.constant().is_none() {
        return Err(RootError::Unsupported("the constant monomial was eliminated".into()));
    }
    let missing = var_dict.missing_variables();
    if !missing.is_empty() {
        return Err(RootError::Unsupported(format!(
            "variables {missing:?} were eliminated by the reduction"
        )));
    }

    let f = generic_polynomial(basis, num_vars, &config.coeff_range, &mut config.rng())?;
    let m_f = tvb_mult_matrix(&f, &reduction, &vb, &order)?;
    Ok(Solutions::Roots(recover_roots(&m_f, &vb, None, config)?))
}

/// Finds the common roots of `polys`.
///
/// Polynomials in fewer variables are padded to the largest count; zero
/// polynomials are ignored. With `config.polish` every root is refined by
/// [`newton_polish`] against the nonzero polynomials, so padding a square
/// system with zero polynomials is harmless.
///
/// # Errors
///
/// See [`RootError`]. Nothing is retried with another method. Polishing
/// fails with [`RootError::NonSquareSystem`] when the number of nonzero
/// polynomials differs from the number of variables.
pub fn find_roots(polys: &[Polynomial], method: Method, config: &SolverConfig) -> Result<Solutions> {
    let _span = debug_span!("find_roots", %method, polys = polys.len()).entered();
    let (polys, basis, num_vars) = prepare(polys)?;

    let solutions = match method {
        Method::Groebner => {
            let gb = groebner_basis(&polys, &config.buchberger())?;
            debug!(size = gb.len(), "computed Groebner basis");
            roots_from_groebner(&gb, basis, num_vars, config)?
        }
        Method::Macaulay => {
            let gb = macaulay_basis(&polys, config.zero_tol)?;
            debug!(size = gb.len(), "computed Macaulay basis");
            roots_from_groebner(&gb, basis, num_vars, config)?
        }
        Method::Tvb => roots_from_reduction(&polys, basis, num_vars, config)?,
    };

    match solutions {
        Solutions::Roots(roots) if config.polish => {
            let polished = roots
                .iter()
                .map(|r| newton_polish(&polys, r, config).map(|out| out.root))
                .collect::<Result<Vec<_>>>()?;
            Ok(Solutions::Roots(polished))
        }
        other => Ok(other),
    }
}

/// Solves independent systems in parallel.
#[must_use]
pub fn solve_batch(systems: &[Vec<Polynomial>], method: Method, config: &SolverConfig) -> Vec<Result<Solutions>> {
    systems
        .par_iter()
        .map(|polys| find_roots(polys, method, config))
        .collect()
}

/// `|p(root)|` for each polynomial.
///
/// # Errors
///
/// Fails if a polynomial has a different number of variables than `root`.
pub fn residuals(polys: &[Polynomial], root: &Root) -> Result<Vec<f64>> {
    polys
        .iter()
        .map(|p| -> Result<f64> { Ok(p.evaluate_at(root.coords())?.norm()) })
        .collect()
}
