//! Mean-variance hedging engine.
//!
//! Runs the four stages in dependency order:
//!
//! 1. attainable-node lattice of cumulative scaled log-returns
//! 2. variance-optimal measure from physical probabilities and `rf`
//! 3. mean-value process by backward induction under that measure
//! 4. hedge ratios under the physical measure
//!
//! Every stage yields an immutable value consumed by the next; the engine
//! itself holds only validated inputs, so repeated calculations on the same
//! engine give identical results.

use crate::market_parameters::MarketParameters;
use mvh_core::{Result, Size};
use mvh_instruments::{EuropeanClaim, Payoff, PricingEngine, PricingResults};
use mvh_math::StateVector;
use mvh_methods::{HedgeRatios, HedgeReplay, Lattice, ValueProcess};
use mvh_models::{ReturnSpace, VarianceOptimalMeasure};
use tracing::{debug, instrument};

/// Everything one hedging run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgingResults {
    lattice: Lattice,
    measure: VarianceOptimalMeasure,
    values: ValueProcess,
    deltas: HedgeRatios,
}

impl HedgingResults {
    /// Attainable nodes.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Calibrated variance-optimal measure.
    pub fn measure(&self) -> &VarianceOptimalMeasure {
        &self.measure
    }

    /// Mean-value process `H`.
    pub fn values(&self) -> &ValueProcess {
        &self.values
    }

    /// Hedge ratios `δ`.
    pub fn deltas(&self) -> &HedgeRatios {
        &self.deltas
    }

    /// Scalar summary: `npv = H_0` plus `delta`, `a`, `b` and `q_min`.
    pub fn summary(&self) -> PricingResults {
        let mut results = PricingResults::from_npv(self.values.initial_value())
            .with_result("a", self.measure.a())
            .with_result("b", self.measure.b())
            .with_result("q_min", self.measure.q_probs().min());
        if let Some(delta) = self.deltas.initial_delta() {
            results = results.with_result("delta", delta);
        }
        results
    }
}

/// Prices and hedges European claims on a recombining log-return lattice.
#[derive(Debug, Clone)]
pub struct MeanVarianceHedgingEngine {
    params: MarketParameters,
    space: ReturnSpace,
    return_levels: StateVector,
    physical_probs: StateVector,
}

impl MeanVarianceHedgingEngine {
    /// Validate `params` and create the engine.
    pub fn new(params: MarketParameters) -> Result<Self> {
        let space = params.validate()?;
        let return_levels = params.return_levels();
        let physical_probs = params.physical_probs();
        Ok(Self {
            params,
            space,
            return_levels,
            physical_probs,
        })
    }

    /// The market configuration.
    pub fn parameters(&self) -> &MarketParameters {
        &self.params
    }

    /// The validated return space.
    pub fn return_space(&self) -> &ReturnSpace {
        &self.space
    }

    /// Build the attainable-node lattice.
    pub fn lattice(&self) -> Result<Lattice> {
        Lattice::build(&self.space, self.params.horizon)
    }

    /// Calibrate the variance-optimal measure.
    pub fn calibrate(&self) -> Result<VarianceOptimalMeasure> {
        VarianceOptimalMeasure::calibrate(
            &self.return_levels,
            self.params.risk_free,
            &self.physical_probs,
        )
    }

    /// Run all four stages for `payoff`.
    #[instrument(level = "debug", skip_all, fields(payoff = %payoff.description()))]
    pub fn hedge(&self, payoff: &dyn Payoff) -> Result<HedgingResults> {
        let (spot, risk_free) = (self.params.spot, self.params.risk_free);

        let lattice = self.lattice()?;
        let measure = self.calibrate()?;
        let values = ValueProcess::compute(
            &lattice,
            &self.space,
            spot,
            risk_free,
            measure.q_probs(),
            payoff,
        )?;
        let deltas = HedgeRatios::compute(
            &lattice,
            &values,
            &self.space,
            spot,
            risk_free,
            &self.return_levels,
            &self.physical_probs,
        )?;

        debug!(
            npv = values.initial_value(),
            delta = deltas.initial_delta(),
            proper_measure = measure.is_proper(),
            "hedging run complete"
        );
        Ok(HedgingResults {
            lattice,
            measure,
            values,
            deltas,
        })
    }

    /// Replay the hedge from `results` along `path` (state indices, one per
    /// step).
    pub fn replay(
        &self,
        results: &HedgingResults,
        payoff: &dyn Payoff,
        path: &[Size],
    ) -> Result<HedgeReplay> {
        HedgeReplay::run(
            &results.values,
            &results.deltas,
            &self.space,
            self.params.spot,
            self.params.risk_free,
            payoff,
            path,
        )
    }
}

impl PricingEngine<EuropeanClaim> for MeanVarianceHedgingEngine {
    type Results = HedgingResults;

    fn calculate(&self, claim: &EuropeanClaim) -> Result<HedgingResults> {
        self.hedge(claim.payoff())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_parameters::MarketParametersBuilder;
    use approx::assert_abs_diff_eq;
    use mvh_core::Error;
    use mvh_instruments::PlainVanillaPayoff;
    use std::sync::Arc;

    fn engine(horizon: Size) -> MeanVarianceHedgingEngine {
        let params =
            MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, vec![0.3, 0.35, 0.35])
                .with_horizon(horizon)
                .with_spot(100.0)
                .with_risk_free(1.001)
                .build()
                .unwrap();
        MeanVarianceHedgingEngine::new(params).unwrap()
    }

    #[test]
    fn produces_every_stage() {
        let e = engine(5);
        let call = PlainVanillaPayoff::call(100.0);
        let r = e.hedge(&call).unwrap();
        assert_eq!(r.lattice().horizon(), 5);
        assert_eq!(r.deltas().periods(), 5);
        assert_abs_diff_eq!(r.measure().q_probs().sum(), 1.0, epsilon = 1e-9);
        for (t, x) in r.lattice().iter() {
            assert!(r.values().value(t, x).is_some());
            assert_eq!(r.deltas().delta(t, x).is_some(), t < 5);
        }
    }

    #[test]
    fn summary_reports_npv_and_delta() {
        let e = engine(3);
        let claim = EuropeanClaim::new(Arc::new(PlainVanillaPayoff::call(100.0)));
        let r = e.calculate(&claim).unwrap();
        let s = r.summary();
        assert_abs_diff_eq!(s.npv, r.values().initial_value());
        assert!(s.result("delta").is_some());
        assert!(s.result("q_min").unwrap() >= 0.0);
    }

    #[test]
    fn riskless_market_is_degenerate() {
        let params = MarketParametersBuilder::new(vec![0.0, 0.0], 100.0, vec![0.5, 0.5])
            .with_horizon(2)
            .build()
            .unwrap();
        let e = MeanVarianceHedgingEngine::new(params).unwrap();
        let err = e.hedge(&PlainVanillaPayoff::call(100.0)).unwrap_err();
        assert!(matches!(err, Error::DegenerateMarket(_)));
    }

    #[test]
    fn unchecked_parameters_are_validated_on_construction() {
        let mut params = engine(2).parameters().clone();
        params.physical_probs = vec![0.9, 0.9, 0.9];
        assert!(MeanVarianceHedgingEngine::new(params).is_err());
    }
}
