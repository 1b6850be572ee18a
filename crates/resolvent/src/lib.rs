//! # Resolvent
//!
//! Common roots of zero-dimensional multivariate polynomial systems.
//!
//! A system is turned into a multiplication operator on its quotient ring,
//! either through a Groebner basis or through a rank-revealing reduction of
//! its Macaulay matrix, and the roots are read off the eigenvectors.
//!
//! ## Features
//!
//! - **Two Bases**: power and Chebyshev polynomials behind one type
//! - **Three Front-ends**: Buchberger, Macaulay echelon form, and the
//!   truncated normal form of a QR-reduced Macaulay matrix
//! - **Conditioning Gate**: ill-conditioned reductions are reported, never
//!   silently used
//! - **Newton Polishing**: optional refinement of every root
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resolvent::prelude::*;
//!
//! let circle = Polynomial::from_terms(Basis::Power, 2, [
//!     (Monomial::new(&[2, 0]), 1.0),
//!     (Monomial::new(&[0, 2]), 1.0),
//!     (Monomial::new(&[0, 0]), -5.0),
//! ])?;
//! let hyperbola = Polynomial::from_terms(Basis::Power, 2, [
//!     (Monomial::new(&[1, 1]), 1.0),
//!     (Monomial::new(&[0, 0]), -2.0),
//! ])?;
//! let solutions = find_roots(&[circle, hyperbola], Method::Tvb, &SolverConfig::default())?;
//! assert_eq!(solutions.roots().len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use resolvent_groebner as groebner;
pub use resolvent_linalg as linalg;
pub use resolvent_poly as poly;
pub use resolvent_solve as solve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use resolvent_groebner::{groebner_basis, BuchbergerConfig, MacaulayMatrix};
    pub use resolvent_linalg::DenseMatrix;
    pub use resolvent_poly::{Basis, Monomial, MonomialOrder, Polynomial};
    pub use resolvent_solve::{
        find_roots, newton_polish, residuals, solve_batch, Method, ReductionStrategy, Root, RootError,
        Solutions, SolverConfig,
    };
}
