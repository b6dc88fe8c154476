//! European contingent claims and the pricing-engine seam.
//!
//! A claim only knows its payoff; the market (return space, horizon,
//! probabilities, rates) lives in the engine that prices and hedges it.

use crate::payoff::Payoff;
use mvh_core::Real;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A claim paying `payoff(S_T)` at the lattice horizon.
#[derive(Debug, Clone)]
pub struct EuropeanClaim {
    payoff: Arc<dyn Payoff>,
}

impl EuropeanClaim {
    /// Wrap a payoff.
    pub fn new(payoff: Arc<dyn Payoff>) -> Self {
        Self { payoff }
    }

    /// The terminal payoff.
    pub fn payoff(&self) -> &dyn Payoff {
        self.payoff.as_ref()
    }
}

/// Scalar summary of a pricing run.
///
/// Contains the NPV and additional named results (e.g. `"delta"`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResults {
    /// Net present value.
    pub npv: Real,
    /// Additional named results.
    pub additional_results: BTreeMap<String, Real>,
}

impl PricingResults {
    /// Create pricing results with just an NPV.
    pub fn from_npv(npv: Real) -> Self {
        Self {
            npv,
            additional_results: BTreeMap::new(),
        }
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }

    /// Look up a named result.
    pub fn result(&self, key: &str) -> Option<Real> {
        self.additional_results.get(key).copied()
    }
}

/// Base trait for pricing engines.
///
/// An engine computes `Self::Results` for claims described by `Args`.
pub trait PricingEngine<Args>: std::fmt::Debug + Send + Sync {
    /// What a successful calculation produces.
    type Results;

    /// Price (and hedge) the claim described by `args`.
    fn calculate(&self, args: &Args) -> mvh_core::Result<Self::Results>;
}
