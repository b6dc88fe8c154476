//! # mvh-instruments
//!
//! Contingent claims priced and hedged on the lattice: payoffs of the
//! terminal asset price, the European claim wrapping one, and the
//! `PricingEngine` seam engines implement.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod instrument;
pub mod payoff;

pub use instrument::{EuropeanClaim, PricingEngine, PricingResults};
pub use payoff::{CashOrNothingPayoff, FnPayoff, OptionType, Payoff, PlainVanillaPayoff};
