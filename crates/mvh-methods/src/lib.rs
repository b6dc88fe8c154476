//! # mvh-methods
//!
//! Numerical methods on the recombining log-return lattice.
//!
//! # Modules
//!
//! * [`lattice`]: attainable-node construction, the mean-value process,
//!   hedge ratios, and replay of the resulting self-financing hedge

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: attainable nodes and backward recursions.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{HedgeRatios, HedgeReplay, Lattice, ValueProcess};
