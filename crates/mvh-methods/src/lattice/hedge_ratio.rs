//! Locally variance-minimising hedge ratios.
//!
//! Between `t` and `t + 1` the hedger holds `δ_t(x)` units of the asset,
//! chosen to minimise the physical variance of the tracking error:
//!
//! ```text
//! ΔH_j = H_{t+1}(x + dx_j) − rf · H_t(x)
//! δ_t(x) = E_p[ΔH · (R − rf)] / (S_t · E_p[(R − rf)²])
//! ```
//!
//! Each entry only reads the finished value process, so layers are
//! independent of one another.

use super::{ensure_market, successor_values, Lattice, NodeValues, ValueProcess};
use mvh_core::{degenerate, ensure, Error, GrossReturn, Offset, Price, Real, Result, Size};
use mvh_math::{is_negligible, validate_distribution, StateVector, PROBABILITY_SUM_TOLERANCE};
use mvh_models::ReturnSpace;
use tracing::{debug, trace};

/// Units of the underlying held at each node for `t = 0..T−1`.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeRatios {
    layers: Vec<NodeValues>,
}

impl HedgeRatios {
    /// Compute the hedge ratio at every non-terminal node.
    ///
    /// `return_levels` and `p_probs` are aligned with the states of `space`.
    pub fn compute(
        lattice: &Lattice,
        values: &ValueProcess,
        space: &ReturnSpace,
        s0: Price,
        rf: GrossReturn,
        return_levels: &StateVector,
        p_probs: &StateVector,
    ) -> Result<Self> {
        ensure_market(s0, rf)?;
        ensure!(
            return_levels.len() == space.len() && p_probs.len() == space.len(),
            "{} return levels and {} physical probabilities for {} states",
            return_levels.len(),
            p_probs.len(),
            space.len()
        );
        ensure!(
            values.horizon() == lattice.horizon(),
            "value process horizon {} differs from lattice horizon {}",
            values.horizon(),
            lattice.horizon()
        );
        validate_distribution(p_probs.as_slice(), PROBABILITY_SUM_TOLERANCE)?;

        let excess = return_levels.shift(rf);
        let second_moment = excess.component_mul(&excess).expectation(p_probs);
        if is_negligible(second_moment) {
            degenerate!("E_p[(R - rf)^2] = {second_moment}: the asset is riskless under p");
        }

        let horizon = lattice.horizon();
        let mut layers = vec![NodeValues::new(); horizon];
        for t in (0..horizon).rev() {
            let next = values
                .layer(t + 1)
                .ok_or(Error::MissingNode { step: t + 1, offset: 0 })?;
            let mut current = NodeValues::new();
            for &x in lattice.layer(t).into_iter().flatten() {
                let st = lattice.price_at(s0, x);
                let ht = values
                    .value(t, x)
                    .ok_or(Error::MissingNode { step: t, offset: x })?;
                let change = successor_values(next, t + 1, x, space.offsets())?.shift(rf * ht);
                let cov = change.component_mul(&excess).expectation(p_probs);
                current.insert(x, cov / (st * second_moment));
            }
            trace!(step = t, nodes = current.len(), "hedge layer");
            layers[t] = current;
        }

        debug!(
            horizon,
            initial_delta = layers.first().and_then(|l| l.get(&0)).copied(),
            "computed hedge ratios"
        );
        Ok(Self { layers })
    }

    /// Number of hedging periods (the lattice horizon).
    pub fn periods(&self) -> Size {
        self.layers.len()
    }

    /// Hedge ratio `δ_t(x)`, or `None` if `(t, x)` is not a node with `t < T`.
    pub fn delta(&self, t: Size, x: Offset) -> Option<Real> {
        self.layers.get(t).and_then(|l| l.get(&x)).copied()
    }

    /// Hedge ratio at the root node.
    pub fn initial_delta(&self) -> Option<Real> {
        self.delta(0, 0)
    }

    /// All hedge ratios at step `t`.
    pub fn layer(&self, t: Size) -> Option<&NodeValues> {
        self.layers.get(t)
    }
}
