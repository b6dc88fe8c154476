//! # mvh-math
//!
//! Mathematical utilities: the nalgebra-backed [`StateVector`] used for every
//! per-state quantity of the one-period model, floating-point comparisons,
//! and probability-vector validation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability-vector checks.
pub mod probability;

/// Vectors indexed by the states of the one-period return space.
pub mod state_vector;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::{close, is_negligible};
pub use probability::{validate_distribution, PROBABILITY_SUM_TOLERANCE};
pub use state_vector::StateVector;
