//! # resolvent-solve
//!
//! Roots of zero-dimensional polynomial systems by eigenvalue methods.
//!
//! This crate provides:
//! - A rank-revealing QR reducer for Macaulay matrices with a conditioning
//!   gate
//! - Quotient-ring bases from Groebner bases or reduced Macaulay matrices
//! - Multiplication matrices by a random linear form
//! - Root recovery from eigenvectors, with Newton polishing
//!
//! ```rust,ignore
//! use resolvent_solve::{find_roots, Method, SolverConfig};
//!
//! let solutions = find_roots(&polys, Method::Groebner, &SolverConfig::default().with_seed(1))?;
//! for root in solutions.roots() {
//!     println!("{:?}", root.coords());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod basis;
pub mod config;
pub mod error;
pub mod multiplication;
pub mod newton;
pub mod reducer;
pub mod roots;
pub mod solver;

#[cfg(test)]
mod proptests;

pub use basis::{classify_ideal, IdealStatus, VarDict, VectorSpaceBasis};
pub use config::{Method, ReductionStrategy, SolverConfig};
pub use error::RootError;
pub use multiplication::{coordinate_vector, generic_polynomial, mult_matrix, sorted_by_lead_ratio, tvb_mult_matrix};
pub use newton::{newton_polish, NewtonOutcome};
pub use reducer::{Reducer, Reduction};
pub use roots::{recover_roots, resolve_missing, Root};
pub use solver::{find_roots, residuals, solve_batch, Solutions};
