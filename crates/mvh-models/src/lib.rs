//! # mvh-models
//!
//! The one-period market model underlying the hedging lattice.
//!
//! * [`ReturnSpace`]: the i.i.d. per-period log-returns and the scale
//!   factor turning them into integer lattice offsets
//! * [`VarianceOptimalMeasure`]: the global variance-optimal pricing
//!   measure calibrated from physical probabilities and the risk-free rate

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod return_space;
pub mod variance_optimal;

// ── Re-exports ───────────────────────────────────────────────────────────
pub use return_space::ReturnSpace;
pub use variance_optimal::VarianceOptimalMeasure;
