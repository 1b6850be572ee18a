//! # resolvent-linalg
//!
//! Dense floating-point linear algebra for the resolvent root finder.
//!
//! This crate provides:
//! - Row-major dense matrices over `f64` and `Complex64`
//! - Householder QR, unpivoted and rank-revealing, on matrix windows
//! - Upper-triangular back substitution
//! - Singular values and condition numbers by one-sided Jacobi
//! - Complex LU solves and general eigen-decomposition
//!
//! All routines are sequential; the matrices they see are Macaulay blocks
//! and multiplication operators of at most a few hundred rows.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]

pub mod dense_matrix;
pub mod eig;
pub mod error;
pub mod lu;
pub mod qr;
pub mod svd;
pub mod triangular;

pub use dense_matrix::DenseMatrix;
pub use eig::{eig, EigConfig, Eigen};
pub use error::LinalgError;
pub use lu::lu_solve;
pub use qr::{householder_qr, pivoted_qr, Householder, PivotedQr, WindowQr};
pub use svd::{condition_number, singular_values};
pub use triangular::backsolve_in_place;
