//! # mvh-pricingengines
//!
//! The mean-variance hedging engine and its market configuration.
//!
//! ## Engines
//!
//! - [`MeanVarianceHedgingEngine`]: lattice, variance-optimal measure,
//!   mean-value process and hedge ratios for European claims
//!
//! ## Configuration
//!
//! - [`MarketParameters`] / [`MarketParametersBuilder`]: validated model
//!   inputs (serde-enabled with the `serde` feature)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod market_parameters;
pub mod mean_variance_engine;

pub use market_parameters::{MarketParameters, MarketParametersBuilder};
pub use mean_variance_engine::{HedgingResults, MeanVarianceHedgingEngine};
