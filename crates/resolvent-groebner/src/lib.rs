//! # resolvent-groebner
//!
//! Macaulay matrices and numerical Groebner bases.
//!
//! This crate provides:
//! - Macaulay matrix construction at the Macaulay degree bound, with the
//!   three-block column partition used by the elimination pipeline
//! - A Groebner basis read off the echelon form of the Macaulay matrix
//! - Buchberger's algorithm with floating-point coefficients and zero
//!   snapping, for power and Chebyshev basis input
//!
//! All leading terms are taken in graded reverse lexicographic order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod buchberger;
pub mod criteria;
pub mod error;
pub mod macaulay;
pub mod reduce;

pub use buchberger::{groebner_basis, Buchberger, BuchbergerConfig};
pub use error::GroebnerError;
pub use macaulay::{macaulay_basis, macaulay_degree, MacaulayMatrix, MacaulayRow};
pub use reduce::{normal_form, s_polynomial};
