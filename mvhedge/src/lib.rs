//! # mvhedge
//!
//! Discrete-time mean-variance hedging of European claims.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `mvh-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! mvhedge = "0.1"
//! ```
//!
//! ```rust
//! use mvhedge::instruments::PlainVanillaPayoff;
//! use mvhedge::pricingengines::{MarketParametersBuilder, MeanVarianceHedgingEngine};
//!
//! let params = MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, vec![0.3, 0.3, 0.4])
//!     .with_horizon(10)
//!     .with_spot(100.0)
//!     .with_risk_free(1.001)
//!     .build()
//!     .unwrap();
//! let engine = MeanVarianceHedgingEngine::new(params).unwrap();
//! let results = engine.hedge(&PlainVanillaPayoff::call(100.0)).unwrap();
//!
//! assert_eq!(results.lattice().horizon(), 10);
//! assert!(results.values().initial_value() > 0.0);
//! assert!(results.deltas().initial_delta().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use mvh_core as core;

/// Tolerances, probability checks, and per-state vectors.
pub use mvh_math as math;

/// Return space and the variance-optimal measure.
pub use mvh_models as models;

/// Payoffs, claims, and the pricing-engine seam.
pub use mvh_instruments as instruments;

/// Attainable-node lattice, value process, hedge ratios, hedge replay.
pub use mvh_methods as methods;

/// Market configuration and the mean-variance hedging engine.
pub use mvh_pricingengines as pricingengines;
