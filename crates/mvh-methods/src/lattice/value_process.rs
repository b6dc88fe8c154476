//! Mean-value process of a European claim.
//!
//! ```text
//! H_T(x) = payoff(S0 · exp(x / scale))
//! H_t(x) = Σ_j q_j · H_{t+1}(x + dx_j) / rf
//! ```
//!
//! Layers are filled strictly from `T` down to `0`; a layer is never read
//! before every node of it has been computed.

use super::{ensure_market, successor_values, Lattice, NodeValues};
use mvh_core::{ensure, Error, GrossReturn, Offset, Price, Real, Result, Size};
use mvh_instruments::Payoff;
use mvh_math::StateVector;
use mvh_models::ReturnSpace;
use tracing::{debug, trace};

/// Discounted conditional expectation of the claim at every lattice node,
/// under the variance-optimal measure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueProcess {
    layers: Vec<NodeValues>,
    initial_value: Real,
}

impl ValueProcess {
    /// Run the backward recursion.
    ///
    /// `q_probs` is aligned with the states of `space`. The lattice must
    /// have been built from the same offsets; otherwise a successor lookup
    /// fails with [`Error::MissingNode`].
    pub fn compute(
        lattice: &Lattice,
        space: &ReturnSpace,
        s0: Price,
        rf: GrossReturn,
        q_probs: &StateVector,
        payoff: &dyn Payoff,
    ) -> Result<Self> {
        ensure_market(s0, rf)?;
        ensure!(
            q_probs.len() == space.len(),
            "{} pricing probabilities for {} states",
            q_probs.len(),
            space.len()
        );
        ensure!(
            lattice.scale_factor() == space.scale_factor(),
            "lattice scale {} differs from return-space scale {}",
            lattice.scale_factor(),
            space.scale_factor()
        );

        let horizon = lattice.horizon();
        let mut layers = vec![NodeValues::new(); horizon + 1];

        layers[horizon] = lattice
            .layer(horizon)
            .into_iter()
            .flatten()
            .map(|&x| (x, payoff.value(lattice.price_at(s0, x))))
            .collect();

        for t in (0..horizon).rev() {
            let next = &layers[t + 1];
            let mut current = NodeValues::new();
            for &x in lattice.layer(t).into_iter().flatten() {
                let successors = successor_values(next, t + 1, x, space.offsets())?;
                current.insert(x, successors.expectation(q_probs) / rf);
            }
            trace!(step = t, nodes = current.len(), "value layer");
            layers[t] = current;
        }

        let initial_value = layers[0]
            .get(&0)
            .copied()
            .ok_or(Error::MissingNode { step: 0, offset: 0 })?;
        debug!(
            payoff = %payoff.description(),
            initial_value,
            horizon,
            "computed mean-value process"
        );

        Ok(Self {
            layers,
            initial_value,
        })
    }

    /// Horizon `T` of the underlying lattice.
    pub fn horizon(&self) -> Size {
        self.layers.len() - 1
    }

    /// Value `H_t(x)`, or `None` if `(t, x)` is not a node.
    pub fn value(&self, t: Size, x: Offset) -> Option<Real> {
        self.layers.get(t).and_then(|l| l.get(&x)).copied()
    }

    /// `H_0` at the root node.
    pub fn initial_value(&self) -> Real {
        self.initial_value
    }

    /// All values at step `t`.
    pub fn layer(&self, t: Size) -> Option<&NodeValues> {
        self.layers.get(t)
    }
}
