//! Dense multivariate polynomials in the power or Chebyshev basis.
//!
//! Coefficients live in a row-major n-dimensional array: the coefficient of
//! the basis element with exponent vector `(e_0, ..., e_{n-1})` sits at
//! `sum(e_i * stride_i)` where the last variable varies fastest. The leading
//! term is the largest nonzero monomial in graded reverse lexicographic order
//! and is recomputed after every mutation.

use std::cmp::Ordering;
use std::fmt;

use num_complex::Complex64;
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::error::{PolyError, Result};
use crate::monomial::{cmp_grevlex, Monomial};

type Shape = SmallVec<[usize; 4]>;

/// The family of univariate basis functions a polynomial is expanded in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Basis {
    /// Monomials `x^k`.
    #[default]
    Power,
    /// Chebyshev polynomials of the first kind `T_k(x)`.
    Chebyshev,
}

impl Basis {
    /// Returns a short name for the basis.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Basis::Power => "power",
            Basis::Chebyshev => "chebyshev",
        }
    }

    /// The first `len` basis functions of one variable evaluated at `x`.
    fn values(self, x: Complex64, len: usize) -> Vec<Complex64> {
        let mut out = Vec::with_capacity(len);
        if len == 0 {
            return out;
        }
        out.push(Complex64::one());
        if len == 1 {
            return out;
        }
        out.push(x);
        for k in 2..len {
            let next = match self {
                Basis::Power => out[k - 1] * x,
                Basis::Chebyshev => x * out[k - 1] * 2.0 - out[k - 2],
            };
            out.push(next);
        }
        out
    }

    /// Derivatives of the first `len` basis functions at `x`.
    fn derivatives(self, x: Complex64, len: usize) -> Vec<Complex64> {
        // T_k' = k U_{k-1}; the power basis reuses its own value table.
        let lower = match self {
            Basis::Power => self.values(x, len),
            Basis::Chebyshev => {
                let mut u = Vec::with_capacity(len);
                for k in 0..len {
                    let next = match k {
                        0 => Complex64::one(),
                        1 => x * 2.0,
                        _ => x * u[k - 1] * 2.0 - u[k - 2],
                    };
                    u.push(next);
                }
                u
            }
        };
        (0..len)
            .map(|k| {
                if k == 0 {
                    Complex64::zero()
                } else {
                    lower[k - 1] * k as f64
                }
            })
            .collect()
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dense multivariate polynomial with real coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    basis: Basis,
    shape: Shape,
    coeffs: Vec<f64>,
    lead_term: Option<Monomial>,
}

fn strides(shape: &[usize]) -> Shape {
    let mut s: Shape = SmallVec::from_elem(1, shape.len());
    for i in (0..shape.len().saturating_sub(1)).rev() {
        s[i] = s[i + 1] * shape[i + 1];
    }
    s
}

fn flat_of(exps: &[u32], strides: &[usize]) -> usize {
    exps.iter().zip(strides).map(|(&e, &s)| e as usize * s).sum()
}

impl Polynomial {
    /// Creates a polynomial from a row-major coefficient array.
    ///
    /// `shape[i]` is one more than the largest exponent of variable `i` the
    /// array can hold.
    ///
    /// # Errors
    ///
    /// Fails if `shape` is empty or does not match the buffer length.
    pub fn new(basis: Basis, shape: &[usize], coeffs: Vec<f64>) -> Result<Self> {
        if shape.is_empty() {
            return Err(PolyError::NoVariables);
        }
        let expected: usize = shape.iter().product();
        if shape.contains(&0) || expected != coeffs.len() {
            return Err(PolyError::ShapeMismatch {
                shape: shape.to_vec(),
                len: coeffs.len(),
            });
        }
        Ok(Self::assemble(basis, SmallVec::from_slice(shape), coeffs))
    }

    /// Creates a polynomial from `(monomial, coefficient)` pairs.
    ///
    /// Repeated monomials are summed.
    ///
    /// # Errors
    ///
    /// Fails if `num_vars` is zero or a monomial has the wrong width.
    pub fn from_terms<I>(basis: Basis, num_vars: usize, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Monomial, f64)>,
    {
        if num_vars == 0 {
            return Err(PolyError::NoVariables);
        }
        let terms: Vec<(Monomial, f64)> = terms.into_iter().collect();

        let mut shape: Shape = SmallVec::from_elem(1, num_vars);
        for (m, _) in &terms {
            if m.num_vars() != num_vars {
                return Err(PolyError::DimensionMismatch {
                    expected: num_vars,
                    found: m.num_vars(),
                });
            }
            for (extent, &e) in shape.iter_mut().zip(m.exponents()) {
                *extent = (*extent).max(e as usize + 1);
            }
        }

        let st = strides(&shape);
        let mut coeffs = vec![0.0; shape.iter().product()];
        for (m, c) in &terms {
            coeffs[flat_of(m.exponents(), &st)] += c;
        }
        Ok(Self::assemble(basis, shape, coeffs))
    }

    /// The zero polynomial in `num_vars` variables.
    #[must_use]
    pub fn zero(basis: Basis, num_vars: usize) -> Self {
        Self {
            basis,
            shape: SmallVec::from_elem(1, num_vars),
            coeffs: vec![0.0],
            lead_term: None,
        }
    }

    /// The constant polynomial `c` in `num_vars` variables.
    #[must_use]
    pub fn constant(basis: Basis, num_vars: usize, c: f64) -> Self {
        Self::assemble(basis, SmallVec::from_elem(1, num_vars), vec![c])
    }

    fn assemble(basis: Basis, shape: Shape, coeffs: Vec<f64>) -> Self {
        let mut p = Self {
            basis,
            shape,
            coeffs,
            lead_term: None,
        };
        p.trim();
        p.refresh_lead();
        p
    }

    /// Shrinks every axis to the largest exponent actually in use.
    fn trim(&mut self) {
        let mut needed: Shape = SmallVec::from_elem(1, self.shape.len());
        self.for_each_nonzero(|exps, _| {
            for (extent, &e) in needed.iter_mut().zip(exps) {
                *extent = (*extent).max(e as usize + 1);
            }
        });
        if needed == self.shape {
            return;
        }

        let st = strides(&needed);
        let mut coeffs = vec![0.0; needed.iter().product()];
        self.for_each_nonzero(|exps, c| coeffs[flat_of(exps, &st)] = c);
        self.shape = needed;
        self.coeffs = coeffs;
    }

    fn refresh_lead(&mut self) {
        let mut lead: Option<Monomial> = None;
        self.for_each_nonzero(|exps, _| {
            let m = Monomial::new(exps);
            if lead
                .as_ref()
                .map_or(true, |l| cmp_grevlex(&m, l) == Ordering::Greater)
            {
                lead = Some(m);
            }
        });
        self.lead_term = lead;
    }

    /// Visits every nonzero coefficient with its exponent vector.
    fn for_each_nonzero(&self, mut f: impl FnMut(&[u32], f64)) {
        let n = self.shape.len();
        let mut idx = vec![0u32; n];
        for &c in &self.coeffs {
            if c != 0.0 {
                f(&idx, c);
            }
            for axis in (0..n).rev() {
                idx[axis] += 1;
                if (idx[axis] as usize) < self.shape[axis] {
                    break;
                }
                idx[axis] = 0;
            }
        }
    }

    fn flat_index(&self, exps: &[u32]) -> Option<usize> {
        if exps.iter().skip(self.dim()).any(|&e| e != 0) {
            return None;
        }
        let st = strides(&self.shape);
        let mut flat = 0;
        for (i, (&extent, &s)) in self.shape.iter().zip(st.iter()).enumerate() {
            let e = exps.get(i).copied().unwrap_or(0) as usize;
            if e >= extent {
                return None;
            }
            flat += e * s;
        }
        Some(flat)
    }

    /// Returns the basis.
    #[must_use]
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the per-variable extents of the coefficient array.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the raw row-major coefficient array.
    #[must_use]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Returns the total degree (zero for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.lead_term.as_ref().map_or(0, Monomial::total_degree)
    }

    /// Returns the leading monomial, or `None` for the zero polynomial.
    #[must_use]
    pub fn lead_term(&self) -> Option<&Monomial> {
        self.lead_term.as_ref()
    }

    /// Returns the leading coefficient (zero for the zero polynomial).
    #[must_use]
    pub fn lead_coeff(&self) -> f64 {
        self.lead_term.as_ref().map_or(0.0, |m| self.coeff(m))
    }

    /// Returns the coefficient of `m`, zero if it is outside the array.
    #[must_use]
    pub fn coeff(&self, m: &Monomial) -> f64 {
        self.flat_index(m.exponents()).map_or(0.0, |i| self.coeffs[i])
    }

    /// Returns all nonzero terms.
    #[must_use]
    pub fn terms(&self) -> Vec<(Monomial, f64)> {
        let mut out = Vec::new();
        self.for_each_nonzero(|exps, c| out.push((Monomial::new(exps), c)));
        out
    }

    /// Returns the number of nonzero terms.
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.coeffs.iter().filter(|&&c| c != 0.0).count()
    }

    /// Checks if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.lead_term.is_none()
    }

    /// Checks if this is a nonzero constant.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.lead_term.as_ref().is_some_and(Monomial::is_one)
    }

    /// Ratio of the leading coefficient to the total coefficient mass.
    ///
    /// Divisors with a dominant leading coefficient are the stablest to
    /// reduce by.
    #[must_use]
    pub fn lead_ratio(&self) -> f64 {
        let mass: f64 = self.coeffs.iter().map(|c| c.abs()).sum();
        if mass == 0.0 {
            0.0
        } else {
            self.lead_coeff().abs() / mass
        }
    }

    fn check_point(&self, point: &[Complex64]) -> Result<()> {
        if point.len() == self.dim() {
            Ok(())
        } else {
            Err(PolyError::DimensionMismatch {
                expected: self.dim(),
                found: point.len(),
            })
        }
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.basis != other.basis {
            return Err(PolyError::BasisMismatch {
                left: self.basis,
                right: other.basis,
            });
        }
        if self.dim() != other.dim() {
            return Err(PolyError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(())
    }

    /// Evaluates the polynomial at a complex point.
    ///
    /// # Errors
    ///
    /// Fails if the point has the wrong number of coordinates.
    pub fn evaluate_at(&self, point: &[Complex64]) -> Result<Complex64> {
        self.check_point(point)?;
        let tables: Vec<Vec<Complex64>> = point
            .iter()
            .zip(&self.shape)
            .map(|(&x, &len)| self.basis.values(x, len))
            .collect();

        let mut total = Complex64::zero();
        self.for_each_nonzero(|exps, c| {
            let mut term = Complex64::new(c, 0.0);
            for (table, &e) in tables.iter().zip(exps) {
                term *= table[e as usize];
            }
            total += term;
        });
        Ok(total)
    }

    /// Evaluates the gradient at a complex point.
    ///
    /// # Errors
    ///
    /// Fails if the point has the wrong number of coordinates.
    pub fn grad(&self, point: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_point(point)?;
        let values: Vec<Vec<Complex64>> = point
            .iter()
            .zip(&self.shape)
            .map(|(&x, &len)| self.basis.values(x, len))
            .collect();
        let derivs: Vec<Vec<Complex64>> = point
            .iter()
            .zip(&self.shape)
            .map(|(&x, &len)| self.basis.derivatives(x, len))
            .collect();

        let mut out = vec![Complex64::zero(); self.dim()];
        self.for_each_nonzero(|exps, c| {
            for (j, slot) in out.iter_mut().enumerate() {
                let ej = exps[j] as usize;
                if ej == 0 {
                    continue;
                }
                let mut term = derivs[j][ej] * c;
                for (i, &e) in exps.iter().enumerate() {
                    if i != j {
                        term *= values[i][e as usize];
                    }
                }
                *slot += term;
            }
        });
        Ok(out)
    }

    /// Multiplies by the basis element named by `m`.
    ///
    /// In the Chebyshev basis each variable expands through
    /// `T_a T_m = (T_{a+m} + T_{|a-m|}) / 2`. Either way the leading term of
    /// the product is the leading term of `self` times `m`.
    ///
    /// # Errors
    ///
    /// Fails if `m` has the wrong number of variables.
    pub fn mon_mult(&self, m: &Monomial) -> Result<Self> {
        if m.num_vars() != self.dim() {
            return Err(PolyError::DimensionMismatch {
                expected: self.dim(),
                found: m.num_vars(),
            });
        }

        let shape: Shape = self
            .shape
            .iter()
            .zip(m.exponents())
            .map(|(&s, &e)| s + e as usize)
            .collect();
        let st = strides(&shape);
        let mut coeffs = vec![0.0; shape.iter().product()];
        let shift = m.exponents();

        match self.basis {
            Basis::Power => {
                self.for_each_nonzero(|exps, c| {
                    let flat: usize = exps
                        .iter()
                        .zip(shift)
                        .zip(st.iter())
                        .map(|((&e, &k), &s)| (e + k) as usize * s)
                        .sum();
                    coeffs[flat] += c;
                });
            }
            Basis::Chebyshev => {
                let active = shift.iter().filter(|&&k| k > 0).count();
                let weight = 0.5f64.powi(active as i32);
                self.for_each_nonzero(|exps, c| {
                    for mask in 0..(1usize << active) {
                        let mut bit = 0;
                        let mut flat = 0;
                        for ((&e, &k), &s) in exps.iter().zip(shift).zip(st.iter()) {
                            let idx = if k == 0 {
                                e
                            } else {
                                let high = (mask >> bit) & 1 == 1;
                                bit += 1;
                                if high {
                                    e + k
                                } else {
                                    e.abs_diff(k)
                                }
                            };
                            flat += idx as usize * s;
                        }
                        coeffs[flat] += c * weight;
                    }
                });
            }
        }

        Ok(Self::assemble(self.basis, shape, coeffs))
    }

    /// Computes `self - factor * other`.
    ///
    /// # Errors
    ///
    /// Fails if the operands differ in basis or dimension.
    pub fn sub_scaled(&self, other: &Self, factor: f64) -> Result<Self> {
        self.check_compatible(other)?;
        let shape: Shape = self
            .shape
            .iter()
            .zip(&other.shape)
            .map(|(&a, &b)| a.max(b))
            .collect();
        let st = strides(&shape);
        let mut coeffs = vec![0.0; shape.iter().product()];
        self.for_each_nonzero(|exps, c| coeffs[flat_of(exps, &st)] += c);
        other.for_each_nonzero(|exps, c| coeffs[flat_of(exps, &st)] -= factor * c);
        Ok(Self::assemble(self.basis, shape, coeffs))
    }

    /// Computes `self + other`.
    ///
    /// # Errors
    ///
    /// Fails if the operands differ in basis or dimension.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.sub_scaled(other, -1.0)
    }

    /// Computes `self - other`.
    ///
    /// # Errors
    ///
    /// Fails if the operands differ in basis or dimension.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.sub_scaled(other, 1.0)
    }

    /// Multiplies every coefficient by `c`.
    #[must_use]
    pub fn scale(&self, c: f64) -> Self {
        let coeffs = self.coeffs.iter().map(|&v| v * c).collect();
        Self::assemble(self.basis, self.shape.clone(), coeffs)
    }

    /// Scales so the leading coefficient is one. The zero polynomial is
    /// returned unchanged.
    #[must_use]
    pub fn monic(&self) -> Self {
        let lc = self.lead_coeff();
        if lc == 0.0 {
            self.clone()
        } else {
            self.scale(1.0 / lc)
        }
    }

    /// Sets every coefficient with magnitude below `tol` to exactly zero.
    pub fn snap_zeros(&mut self, tol: f64) {
        for c in &mut self.coeffs {
            if c.abs() < tol {
                *c = 0.0;
            }
        }
        self.refresh_lead();
    }

    /// Zeroes the coefficient of `m` and returns its previous value.
    pub fn remove_term(&mut self, m: &Monomial) -> f64 {
        let Some(i) = self.flat_index(m.exponents()) else {
            return 0.0;
        };
        let old = std::mem::take(&mut self.coeffs[i]);
        self.refresh_lead();
        old
    }

    /// Removes and returns every nonzero term whose monomial satisfies `pred`.
    pub fn drain_terms(&mut self, mut pred: impl FnMut(&Monomial) -> bool) -> Vec<(Monomial, f64)> {
        let st = strides(&self.shape);
        let mut hits = Vec::new();
        self.for_each_nonzero(|exps, c| {
            let m = Monomial::new(exps);
            if pred(&m) {
                hits.push((flat_of(exps, &st), m, c));
            }
        });
        if hits.is_empty() {
            return Vec::new();
        }

        let mut drained = Vec::with_capacity(hits.len());
        for (i, m, c) in hits {
            self.coeffs[i] = 0.0;
            drained.push((m, c));
        }
        self.refresh_lead();
        drained
    }

    /// Embeds the polynomial in `num_vars` variables by appending variables
    /// of degree zero.
    ///
    /// # Errors
    ///
    /// Fails if `num_vars` is smaller than the current dimension.
    pub fn promote(&self, num_vars: usize) -> Result<Self> {
        if num_vars < self.dim() {
            return Err(PolyError::CannotTruncate {
                from: self.dim(),
                to: num_vars,
            });
        }
        let mut shape = self.shape.clone();
        shape.resize(num_vars, 1);
        Ok(Self {
            basis: self.basis,
            shape,
            coeffs: self.coeffs.clone(),
            lead_term: self.lead_term.as_ref().map(|m| m.promote(num_vars)),
        })
    }
}
