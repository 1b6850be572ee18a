//! # resolvent-poly
//!
//! Dense multivariate polynomials for the resolvent root finder.
//!
//! This crate provides:
//! - Exponent-vector monomials with lex, grlex and grevlex orderings
//! - Dense polynomials in the power basis or the Chebyshev basis
//! - Monomial multiplication, evaluation and gradients at complex points
//!
//! Every leading term in the workspace is taken with respect to graded
//! reverse lexicographic order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod monomial;
pub mod ordering;
pub mod polynomial;

#[cfg(test)]
mod proptests;

pub use error::PolyError;
pub use monomial::{cmp_grevlex, monomials_of_degree, monomials_up_to_degree, Monomial};
pub use ordering::MonomialOrder;
pub use polynomial::{Basis, Polynomial};
