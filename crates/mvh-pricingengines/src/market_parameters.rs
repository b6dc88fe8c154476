//! Market configuration for the hedging engine.
//!
//! [`MarketParameters`] gathers every recognised input of the model: the
//! one-period log-return space and its scale factor, the horizon, the
//! initial price, the risk-free gross return, and physical probabilities.
//! Gross return levels default to `exp(log_return)`.
//!
//! ```
//! use mvh_pricingengines::MarketParametersBuilder;
//!
//! let params = MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, vec![0.3, 0.4, 0.3])
//!     .with_horizon(10)
//!     .with_spot(100.0)
//!     .with_risk_free(1.001)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.horizon, 10);
//! ```

use mvh_core::{ensure, GrossReturn, Price, Real, Result, Size};
use mvh_math::{validate_distribution, StateVector, PROBABILITY_SUM_TOLERANCE};
use mvh_models::ReturnSpace;

/// Validated inputs of a mean-variance hedging run.
///
/// Deserialised values are unchecked until passed through
/// [`validate`](Self::validate) (which the engine does on construction).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    /// Per-period log-returns (`log_ret_space`).
    pub log_returns: Vec<Real>,
    /// Factor turning log-returns into integer lattice offsets.
    pub scale_factor: Real,
    /// Number of time steps to maturity (`T`).
    pub horizon: Size,
    /// Initial underlying price (`S0`).
    pub spot: Price,
    /// One-period risk-free gross return (`rf`).
    pub risk_free: GrossReturn,
    /// Physical probabilities aligned with `log_returns` (`p_probs`).
    pub physical_probs: Vec<Real>,
    /// Gross return levels (`ret_space`); `exp(log_returns)` when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub return_levels: Option<Vec<Real>>,
}

impl MarketParameters {
    /// Check every field and derive the return space.
    pub fn validate(&self) -> Result<ReturnSpace> {
        let space = ReturnSpace::new(self.log_returns.clone(), self.scale_factor)?;
        ensure!(self.horizon > 0, "horizon must be at least one step");
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive, got {}",
            self.spot
        );
        ensure!(
            self.risk_free.is_finite() && self.risk_free > 0.0,
            "risk-free gross return must be positive, got {}",
            self.risk_free
        );
        ensure!(
            self.physical_probs.len() == space.len(),
            "{} physical probabilities for {} states",
            self.physical_probs.len(),
            space.len()
        );
        validate_distribution(&self.physical_probs, PROBABILITY_SUM_TOLERANCE)?;
        if let Some(levels) = &self.return_levels {
            ensure!(
                levels.len() == space.len(),
                "{} return levels for {} states",
                levels.len(),
                space.len()
            );
            ensure!(
                levels.iter().all(|r| r.is_finite() && *r > 0.0),
                "return levels must be positive"
            );
        }
        Ok(space)
    }

    /// Gross return levels, explicit or `exp(log_returns)`.
    pub fn return_levels(&self) -> StateVector {
        match &self.return_levels {
            Some(levels) => StateVector::from_slice(levels),
            None => StateVector::from_vec(self.log_returns.iter().map(|r| r.exp()).collect()),
        }
    }

    /// Physical probabilities as a state vector.
    pub fn physical_probs(&self) -> StateVector {
        StateVector::from_slice(&self.physical_probs)
    }
}

/// Builder for [`MarketParameters`].
///
/// Defaults: one step, spot 100, no interest (`rf = 1`).
#[derive(Debug, Clone)]
pub struct MarketParametersBuilder {
    params: MarketParameters,
}

impl MarketParametersBuilder {
    /// Begin building from the return space and its physical probabilities.
    pub fn new(log_returns: Vec<Real>, scale_factor: Real, physical_probs: Vec<Real>) -> Self {
        Self {
            params: MarketParameters {
                log_returns,
                scale_factor,
                horizon: 1,
                spot: 100.0,
                risk_free: 1.0,
                physical_probs,
                return_levels: None,
            },
        }
    }

    /// Set the number of steps to maturity.
    pub fn with_horizon(mut self, horizon: Size) -> Self {
        self.params.horizon = horizon;
        self
    }

    /// Set the initial underlying price.
    pub fn with_spot(mut self, spot: Price) -> Self {
        self.params.spot = spot;
        self
    }

    /// Set the one-period risk-free gross return.
    pub fn with_risk_free(mut self, rf: GrossReturn) -> Self {
        self.params.risk_free = rf;
        self
    }

    /// Override the gross return levels used for calibration and hedging.
    pub fn with_return_levels(mut self, levels: Vec<Real>) -> Self {
        self.params.return_levels = Some(levels);
        self
    }

    /// Validate and return the parameters.
    pub fn build(self) -> Result<MarketParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}
