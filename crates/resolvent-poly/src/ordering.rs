//! Monomial orderings.
//!
//! Leading terms, Macaulay column layout and basis sorting all use
//! [`MonomialOrder::Grevlex`]; the other orders exist for comparison and
//! testing.

use std::cmp::Ordering;

use crate::monomial::{cmp_grevlex, cmp_grlex, cmp_lex, Monomial};

/// A monomial ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MonomialOrder {
    /// Lexicographic order.
    Lex,

    /// Graded lexicographic order.
    Grlex,

    /// Graded reverse lexicographic order.
    ///
    /// Compares total degree first, then the exponent of the last variable
    /// with the comparison reversed.
    #[default]
    Grevlex,
}

impl MonomialOrder {
    /// Compares two monomials according to this ordering.
    #[must_use]
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            MonomialOrder::Lex => cmp_lex(a, b),
            MonomialOrder::Grlex => cmp_grlex(a, b),
            MonomialOrder::Grevlex => cmp_grevlex(a, b),
        }
    }

    /// Sorts monomials from largest to smallest.
    pub fn sort_descending(&self, monomials: &mut [Monomial]) {
        monomials.sort_by(|a, b| self.compare(b, a));
    }

    /// Sorts monomials from smallest to largest.
    pub fn sort_ascending(&self, monomials: &mut [Monomial]) {
        monomials.sort_by(|a, b| self.compare(a, b));
    }

    /// Returns a short name for the ordering.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Grlex => "grlex",
            MonomialOrder::Grevlex => "grevlex",
        }
    }
}

impl std::fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
