//! Exponent-vector monomials.
//!
//! A monomial is stored as one exponent per variable. In the power basis the
//! exponent vector `(a, b)` names `x^a y^b`; in the Chebyshev basis the same
//! vector names the product `T_a(x) T_b(y)`. All orderings and divisibility
//! tests work on the exponent vector alone, so they are shared by both bases.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

/// Number of variables stored inline before spilling to the heap.
const INLINE_VARS: usize = 4;

/// A monomial given by its exponent vector.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Monomial {
    exponents: SmallVec<[u32; INLINE_VARS]>,
}

impl Monomial {
    /// Creates a monomial with the given exponents.
    #[must_use]
    pub fn new(exps: &[u32]) -> Self {
        Self {
            exponents: SmallVec::from_slice(exps),
        }
    }

    /// Creates the identity monomial (1) in `num_vars` variables.
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        Self {
            exponents: SmallVec::from_elem(0, num_vars),
        }
    }

    /// Creates the monomial `x_i` in `num_vars` variables.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_vars`.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        assert!(i < num_vars, "variable index {i} out of range for {num_vars} variables");
        let mut m = Self::one(num_vars);
        m.exponents[i] = 1;
        m
    }

    /// Returns the exponent of variable `i` (zero past the end).
    #[must_use]
    pub fn exponent(&self, i: usize) -> u32 {
        self.exponents.get(i).copied().unwrap_or(0)
    }

    /// Returns the exponents as a slice.
    #[must_use]
    pub fn exponents(&self) -> &[u32] {
        &self.exponents
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.exponents.len()
    }

    /// Returns the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.exponents.iter().sum()
    }

    /// Checks if this is the identity monomial.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Returns `Some(i)` if the monomial is a pure power `x_i^k` with `k >= 1`.
    #[must_use]
    pub fn pure_power_of(&self) -> Option<usize> {
        let mut found = None;
        for (i, &e) in self.exponents.iter().enumerate() {
            if e > 0 {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }

    /// Multiplies two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Divides this monomial by another.
    ///
    /// Returns `None` if `other` does not divide `self`.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        if !self.is_divisible_by(other) {
            return None;
        }
        Some(self.zip_with(other, |a, b| a - b))
    }

    /// Checks if `other` divides `self`.
    #[must_use]
    pub fn is_divisible_by(&self, other: &Self) -> bool {
        let n = self.num_vars().max(other.num_vars());
        (0..n).all(|i| other.exponent(i) <= self.exponent(i))
    }

    /// Computes the least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        self.zip_with(other, u32::max)
    }

    /// Computes the greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        self.zip_with(other, u32::min)
    }

    /// Checks if two monomials share no variable.
    #[must_use]
    pub fn is_coprime(&self, other: &Self) -> bool {
        let n = self.num_vars().max(other.num_vars());
        (0..n).all(|i| self.exponent(i) == 0 || other.exponent(i) == 0)
    }

    /// Pads the exponent vector with zeros up to `num_vars` variables.
    ///
    /// Monomials already at least that wide are returned unchanged.
    #[must_use]
    pub fn promote(&self, num_vars: usize) -> Self {
        let mut exponents = self.exponents.clone();
        if exponents.len() < num_vars {
            exponents.resize(num_vars, 0);
        }
        Self { exponents }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let n = self.num_vars().max(other.num_vars());
        Self {
            exponents: (0..n).map(|i| f(self.exponent(i), other.exponent(i))).collect(),
        }
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }

        let mut first = true;
        for (i, &e) in self.exponents.iter().enumerate() {
            if e > 0 {
                if !first {
                    write!(f, "*")?;
                }
                first = false;
                if e == 1 {
                    write!(f, "x{i}")?;
                } else {
                    write!(f, "x{i}^{e}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Compares monomials in lexicographic order.
#[must_use]
pub fn cmp_lex(a: &Monomial, b: &Monomial) -> Ordering {
    let n = a.num_vars().max(b.num_vars());
    for i in 0..n {
        match a.exponent(i).cmp(&b.exponent(i)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Compares monomials in graded lexicographic order.
#[must_use]
pub fn cmp_grlex(a: &Monomial, b: &Monomial) -> Ordering {
    match a.total_degree().cmp(&b.total_degree()) {
        Ordering::Equal => cmp_lex(a, b),
        other => other,
    }
}

/// Compares monomials in graded reverse lexicographic order.
///
/// Ties in total degree go to the monomial with the smaller exponent in the
/// last variable where they differ.
#[must_use]
pub fn cmp_grevlex(a: &Monomial, b: &Monomial) -> Ordering {
    match a.total_degree().cmp(&b.total_degree()) {
        Ordering::Equal => {}
        other => return other,
    }

    let n = a.num_vars().max(b.num_vars());
    for i in (0..n).rev() {
        match b.exponent(i).cmp(&a.exponent(i)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Every monomial in `num_vars` variables of total degree exactly `degree`.
///
/// The list is in descending lexicographic order.
#[must_use]
pub fn monomials_of_degree(num_vars: usize, degree: u32) -> Vec<Monomial> {
    let mut out = Vec::new();
    let mut current = vec![0u32; num_vars];
    fill_degree(&mut current, 0, degree, &mut out);
    out
}

fn fill_degree(current: &mut [u32], pos: usize, remaining: u32, out: &mut Vec<Monomial>) {
    if pos + 1 >= current.len() {
        if let Some(last) = current.last_mut() {
            *last = remaining;
            out.push(Monomial::new(current));
        } else if remaining == 0 {
            out.push(Monomial::new(&[]));
        }
        return;
    }
    for e in (0..=remaining).rev() {
        current[pos] = e;
        fill_degree(current, pos + 1, remaining - e, out);
    }
    current[pos] = 0;
}

/// Every monomial of total degree at most `degree`, lowest degree first.
///
/// The first entry is always the identity monomial.
#[must_use]
pub fn monomials_up_to_degree(num_vars: usize, degree: u32) -> Vec<Monomial> {
    (0..=degree)
        .flat_map(|d| monomials_of_degree(num_vars, d))
        .collect()
}
