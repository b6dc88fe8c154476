//! Variance-optimal martingale measure for i.i.d. one-period returns.
//!
//! Follows Černý, *Dynamic Programming and Mean-Variance Hedging in Discrete
//! Time* (Applied Mathematical Finance 11(1), 2004). With `e = R − rf` the
//! one-period excess return of the risky asset:
//!
//! ```text
//! a = E_p[e] / E_p[e²]
//! b = 1 − E_p[e]² / E_p[e²]
//! m = 1 − a·e / b
//! q = m ⊙ p / Σ(m ⊙ p)
//! ```
//!
//! Returns are i.i.d., so the measure is computed once and reused at every
//! node of the lattice.

use mvh_core::{degenerate, ensure, ensure_post, GrossReturn, Real, Result, Size};
use mvh_math::{
    close, is_negligible, validate_distribution, StateVector, PROBABILITY_SUM_TOLERANCE,
};
use tracing::{debug, warn};

/// Tolerance on `Σ q − 1` after renormalisation.
const NORMALISATION_TOLERANCE: Real = 1e-9;

/// Calibrated variance-optimal measure.
///
/// `q_probs` always sums to one but is not guaranteed to be non-negative;
/// callers who need a proper probability measure check
/// [`is_proper`](Self::is_proper).
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceOptimalMeasure {
    a: Real,
    b: Real,
    density: StateVector,
    q_probs: StateVector,
    expected_excess: Real,
    second_moment: Real,
}

impl VarianceOptimalMeasure {
    /// Calibrate from gross return levels, the risk-free gross return and
    /// physical probabilities aligned with the levels.
    ///
    /// # Errors
    /// * [`Precondition`](mvh_core::Error::Precondition) if `return_levels`
    ///   is empty, lengths differ, or `p_probs` is not a distribution
    ///   (sum within 1e-3 of one).
    /// * [`DegenerateMarket`](mvh_core::Error::DegenerateMarket) if
    ///   `E_p[e²]`, `b` or the unnormalised mass of `q` is zero.
    pub fn calibrate(
        return_levels: &StateVector,
        rf: GrossReturn,
        p_probs: &StateVector,
    ) -> Result<Self> {
        ensure!(!return_levels.is_empty(), "return space is empty");
        ensure!(
            return_levels.len() == p_probs.len(),
            "{} return levels but {} physical probabilities",
            return_levels.len(),
            p_probs.len()
        );
        ensure!(rf.is_finite(), "risk-free return must be finite, got {rf}");
        validate_distribution(p_probs.as_slice(), PROBABILITY_SUM_TOLERANCE)?;

        let excess = return_levels.shift(rf);
        let expected_excess = excess.expectation(p_probs);
        let second_moment = excess.component_mul(&excess).expectation(p_probs);
        if is_negligible(second_moment) {
            degenerate!("E_p[(R - rf)^2] = {second_moment}: the asset is riskless under p");
        }

        let a = expected_excess / second_moment;
        let b = 1.0 - expected_excess * expected_excess / second_moment;
        if is_negligible(b) {
            degenerate!("variance normalisation b = {b}: excess return is a.s. constant");
        }

        let density = excess.map(|e| 1.0 - a * e / b);
        let q_raw = density.component_mul(p_probs);
        let mass = q_raw.sum();
        if is_negligible(mass) {
            degenerate!("variance-optimal weights sum to {mass}");
        }
        let q_probs = &q_raw / mass;
        ensure_post!(
            close(q_probs.sum(), 1.0, NORMALISATION_TOLERANCE),
            "variance-optimal probabilities sum to {}",
            q_probs.sum()
        );

        debug!(
            a,
            b,
            expected_excess,
            second_moment,
            states = q_probs.len(),
            "calibrated variance-optimal measure"
        );
        if q_probs.min() < 0.0 {
            warn!(q = %q_probs, "variance-optimal measure has negative weights");
        }

        Ok(Self {
            a,
            b,
            density,
            q_probs,
            expected_excess,
            second_moment,
        })
    }

    /// Risk-premium adjustment `a = E_p[e] / E_p[e²]`.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Variance normalisation `b = 1 − E_p[e]² / E_p[e²]`.
    pub fn b(&self) -> Real {
        self.b
    }

    /// Per-state density `m` relative to the physical measure.
    pub fn density(&self) -> &StateVector {
        &self.density
    }

    /// Normalised variance-optimal probabilities.
    pub fn q_probs(&self) -> &StateVector {
        &self.q_probs
    }

    /// `E_p[R − rf]`.
    pub fn expected_excess(&self) -> Real {
        self.expected_excess
    }

    /// `E_p[(R − rf)²]`.
    pub fn second_moment(&self) -> Real {
        self.second_moment
    }

    /// Number of states.
    pub fn len(&self) -> Size {
        self.q_probs.len()
    }

    /// `true` if there are no states (never, after calibration).
    pub fn is_empty(&self) -> bool {
        self.q_probs.is_empty()
    }

    /// `true` if every `q` weight is non-negative, i.e. the variance-optimal
    /// signed measure is a genuine probability measure.
    pub fn is_proper(&self) -> bool {
        self.q_probs.iter().all(|&q| q >= 0.0)
    }
}
