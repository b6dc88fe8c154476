//! Lattice methods for mean-variance hedging.
//!
//! # Overview
//!
//! * [`Lattice`]: attainable scaled cumulative log-returns per time step
//! * [`ValueProcess`]: discounted expectation of the claim under the
//!   variance-optimal measure, by backward induction
//! * [`HedgeRatios`]: locally variance-minimising units of the underlying
//!   per node, under the physical measure
//! * [`HedgeReplay`]: the self-financing hedge run along one return path
//!
//! Nodes are identified by `(t, x)` where `x` is an integer offset: the sum
//! of `t` scaled per-period log-returns. The asset price at a node is
//! `S0 · exp(x / scale_factor)`.

pub mod attainable;
pub mod hedge_ratio;
pub mod replay;
pub mod value_process;

pub use attainable::Lattice;
pub use hedge_ratio::HedgeRatios;
pub use replay::HedgeReplay;
pub use value_process::ValueProcess;

use mvh_core::{ensure, Error, GrossReturn, Offset, Price, Real, Result};
use mvh_math::StateVector;
use std::collections::BTreeMap;

/// One time step of a per-node quantity, keyed by offset.
pub type NodeValues = BTreeMap<Offset, Real>;

// ─── Shared checks ───────────────────────────────────────────────────────────

/// Initial price and risk-free gross return must both be finite and positive.
pub(crate) fn ensure_market(s0: Price, rf: GrossReturn) -> Result<()> {
    ensure!(s0.is_finite() && s0 > 0.0, "initial price must be positive, got {s0}");
    ensure!(rf.is_finite() && rf > 0.0, "risk-free return must be positive, got {rf}");
    Ok(())
}

// ─── Successor lookup ─────────────────────────────────────────────────────────

/// Gather `next[x + offsets[j]]` for every state `j`.
///
/// `step` is the time index of `next`; a miss is reported as
/// [`Error::MissingNode`].
pub(crate) fn successor_values(
    next: &NodeValues,
    step: usize,
    x: Offset,
    offsets: &[Offset],
) -> Result<StateVector> {
    offsets
        .iter()
        .map(|&dx| {
            let y = x.saturating_add(dx);
            next.get(&y)
                .copied()
                .ok_or(Error::MissingNode { step, offset: y })
        })
        .collect::<Result<Vec<_>>>()
        .map(StateVector::from_vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successors_in_state_order() {
        let next: NodeValues = [(-2, 1.0), (0, 2.0), (2, 3.0)].into_iter().collect();
        let v = successor_values(&next, 1, 0, &[2, -2, 0]).unwrap();
        assert_eq!(v.as_slice(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn missing_successor_is_reported() {
        let next: NodeValues = [(0, 2.0)].into_iter().collect();
        let err = successor_values(&next, 4, 0, &[0, 3]).unwrap_err();
        assert_eq!(err, Error::MissingNode { step: 4, offset: 3 });
    }
}
