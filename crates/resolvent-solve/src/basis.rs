//! Quotient-ring bases.
//!
//! A zero-dimensional ideal has a finite monomial basis for its quotient
//! ring. It is read either off a Groebner basis (the monomials no leading
//! term divides) or off the trailing columns of a reduced Macaulay matrix.

use rustc_hash::FxHashMap;
use tracing::debug;

use resolvent_poly::{cmp_grevlex, Monomial, Polynomial};

use crate::reducer::Reduction;

/// Positions of the constant and the single variables inside a basis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDict {
    constant: Option<usize>,
    variables: Vec<Option<usize>>,
}

impl VarDict {
    /// Indexes the degree 0 and 1 monomials of `basis`.
    #[must_use]
    pub fn new(basis: &[Monomial], num_vars: usize) -> Self {
        let mut constant = None;
        let mut variables = vec![None; num_vars];
        for (pos, m) in basis.iter().enumerate() {
            match m.total_degree() {
                0 => constant = Some(pos),
                1 => {
                    if let Some(i) = m.pure_power_of() {
                        variables[i] = Some(pos);
                    }
                }
                _ => {}
            }
        }
        Self {
            constant,
            variables,
        }
    }

    /// Position of the constant monomial.
    #[must_use]
    pub fn constant(&self) -> Option<usize> {
        self.constant
    }

    /// Position of `x_i`.
    #[must_use]
    pub fn variable(&self, i: usize) -> Option<usize> {
        self.variables.get(i).copied().flatten()
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Variables whose monomial is not in the basis, in increasing order.
    #[must_use]
    pub fn missing_variables(&self) -> Vec<usize> {
        self.variables
            .iter()
            .enumerate()
            .filter_map(|(i, pos)| pos.is_none().then_some(i))
            .collect()
    }
}

/// What the leading terms of a Groebner basis say about its ideal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdealStatus {
    /// Finitely many solutions.
    ZeroDimensional,
    /// The ideal is the whole ring.
    NoSolutions,
    /// Some variable has no pure power among the leading terms.
    NotZeroDimensional,
}

/// Classifies the ideal generated by a Groebner basis.
#[must_use]
pub fn classify_ideal(gb: &[Polynomial], num_vars: usize) -> IdealStatus {
    if gb.iter().any(Polynomial::is_constant) {
        return IdealStatus::NoSolutions;
    }
    let mut has_pure_power = vec![false; num_vars];
    for lead in gb.iter().filter_map(Polynomial::lead_term) {
        if let Some(i) = lead.pure_power_of() {
            if let Some(slot) = has_pure_power.get_mut(i) {
                *slot = true;
            }
        }
    }
    if has_pure_power.iter().all(|&b| b) {
        IdealStatus::ZeroDimensional
    } else {
        IdealStatus::NotZeroDimensional
    }
}

/// A monomial basis of the quotient ring, sorted ascending in grevlex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorSpaceBasis {
    monomials: Vec<Monomial>,
    index: FxHashMap<Monomial, usize>,
    var_dict: VarDict,
}

impl VectorSpaceBasis {
    /// Builds the basis from monomials in any order.
    #[must_use]
    pub fn new(mut monomials: Vec<Monomial>, num_vars: usize) -> Self {
        monomials.sort_by(cmp_grevlex);
        monomials.dedup();
        let index = monomials
            .iter()
            .enumerate()
            .map(|(i, m)| (m.clone(), i))
            .collect();
        let var_dict = VarDict::new(&monomials, num_vars);
        Self {
            monomials,
            index,
            var_dict,
        }
    }

    /// Standard monomials of a zero-dimensional Groebner basis.
    ///
    /// Every monomial inside the box spanned by the largest leading exponent
    /// along each axis is kept unless some leading term divides it.
    #[must_use]
    pub fn from_groebner(gb: &[Polynomial], num_vars: usize) -> Self {
        let leads: Vec<&Monomial> = gb.iter().filter_map(Polynomial::lead_term).collect();
        let mut bounds = vec![0u32; num_vars];
        for lead in &leads {
            for (i, bound) in bounds.iter_mut().enumerate() {
                *bound = (*bound).max(lead.exponent(i));
            }
        }

        let mut monomials = Vec::new();
        if bounds.iter().all(|&b| b > 0) {
            let mut exps = vec![0u32; num_vars];
            'outer: loop {
                let m = Monomial::new(&exps);
                if !leads.iter().any(|lead| m.is_divisible_by(lead)) {
                    monomials.push(m);
                }
                // odometer over the box, last axis fastest
                let mut axis = num_vars;
                loop {
                    if axis == 0 {
                        break 'outer;
                    }
                    axis -= 1;
                    exps[axis] += 1;
                    if exps[axis] < bounds[axis] {
                        break;
                    }
                    exps[axis] = 0;
                }
            }
        }

        debug!(size = monomials.len(), ?bounds, "vector space basis from Groebner basis");
        Self::new(monomials, num_vars)
    }

    /// Basis read off the trailing columns of a reduced Macaulay matrix.
    ///
    /// The second value maps sorted basis positions back to columns of
    /// `X`: basis monomial `j` labels column `height + order[j]`.
    #[must_use]
    pub fn from_reduction(reduction: &Reduction, num_vars: usize) -> (Self, Vec<usize>) {
        let remaining = reduction.remaining();
        let mut order: Vec<usize> = (0..remaining.len()).collect();
        order.sort_by(|&a, &b| cmp_grevlex(&remaining[a], &remaining[b]));
        let basis = Self::new(remaining.to_vec(), num_vars);
        debug!(size = basis.len(), "vector space basis from reduced matrix");
        (basis, order)
    }

    /// Number of basis monomials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    /// Checks if the basis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monomials.is_empty()
    }

    /// The basis monomials in ascending grevlex order.
    #[must_use]
    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    /// Position of `m` in the basis.
    #[must_use]
    pub fn position(&self, m: &Monomial) -> Option<usize> {
        self.index.get(m).copied()
    }

    /// Checks if `m` is a basis monomial.
    #[must_use]
    pub fn contains(&self, m: &Monomial) -> bool {
        self.index.contains_key(m)
    }

    /// Positions of the constant and the variables.
    #[must_use]
    pub fn var_dict(&self) -> &VarDict {
        &self.var_dict
    }
}
