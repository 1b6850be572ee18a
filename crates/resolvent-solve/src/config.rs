//! Solver configuration.

use std::ops::Range;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use resolvent_groebner::BuchbergerConfig;
use resolvent_linalg::EigConfig;

/// How the Groebner-side or matrix-side quotient basis is obtained.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Method {
    /// Buchberger's algorithm, then division by the basis.
    #[default]
    Groebner,
    /// Echelon form of the Macaulay matrix, then division by the basis.
    Macaulay,
    /// Rank-revealing reduction of the Macaulay matrix (truncated normal
    /// form); no Groebner basis is formed.
    Tvb,
}

impl Method {
    /// Returns a short name for the method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Method::Groebner => "groebner",
            Method::Macaulay => "macaulay",
            Method::Tvb => "tvb",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Orthogonal elimination variant used by the Macaulay reducer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ReductionStrategy {
    /// Householder QR over the whole leading block column, applied to every
    /// column to its right.
    #[default]
    Orthogonal,
    /// QR of the leading block, early back substitution of its rows, then a
    /// Schur-complement update of the rows below.
    SchurComplement,
}

/// Configuration for [`crate::find_roots`].
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Coefficients and matrix entries below this magnitude count as zero.
    pub zero_tol: f64,
    /// The reducer rejects leading blocks with condition number above
    /// `1 / accuracy`.
    pub accuracy: f64,
    /// Newton polishing stops once the update norm drops below this.
    pub newton_tol: f64,
    /// Newton iteration cap.
    pub newton_max_iter: usize,
    /// Whether to polish every recovered root with Newton's method.
    pub polish: bool,
    /// Seed for the generic multiplier; `None` draws from system entropy.
    pub seed: Option<u64>,
    /// Range the integer coefficients of the generic multiplier come from.
    pub coeff_range: Range<u32>,
    /// Reducer variant for [`Method::Tvb`].
    pub strategy: ReductionStrategy,
    /// S-pair budget for [`Method::Groebner`].
    pub max_pairs: usize,
    /// Eigen-solver limits.
    pub eig: EigConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zero_tol: 1e-10,
            accuracy: 1e-10,
            newton_tol: 1e-5,
            newton_max_iter: 100,
            polish: false,
            seed: None,
            coeff_range: 1..1000,
            strategy: ReductionStrategy::default(),
            max_pairs: 10_000,
            eig: EigConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Returns a copy with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy with polishing switched on or off.
    #[must_use]
    pub fn with_polish(mut self, polish: bool) -> Self {
        self.polish = polish;
        self
    }

    /// Returns a copy using the given reducer variant.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ReductionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The random source for the generic multiplier.
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Buchberger settings derived from this configuration.
    #[must_use]
    pub fn buchberger(&self) -> BuchbergerConfig {
        BuchbergerConfig {
            zero_tol: self.zero_tol,
            max_pairs: self.max_pairs,
            ..BuchbergerConfig::default()
        }
    }
}
