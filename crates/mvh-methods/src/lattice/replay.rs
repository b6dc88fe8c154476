//! Replay of the self-financing hedge along a single return path.
//!
//! Starting from `V_0 = H_0`, the hedger holds `δ_t` units of the asset and
//! the rest in the risk-free account:
//!
//! ```text
//! V_{t+1} = rf · V_t + δ_t(x_t) · (S_{t+1} − rf · S_t)
//! ```
//!
//! The tracking error is `V_T − payoff(S_T)`. In a complete two-state market
//! hedged under its martingale measure it vanishes on every path.

use super::{ensure_market, HedgeRatios, ValueProcess};
use mvh_core::{ensure, Error, GrossReturn, Offset, Price, Real, Result, Size};
use mvh_instruments::Payoff;
use mvh_models::ReturnSpace;

/// Wealth and asset trajectories of one hedged path.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeReplay {
    nodes: Vec<Offset>,
    prices: Vec<Price>,
    wealth: Vec<Real>,
    tracking_error: Real,
}

impl HedgeReplay {
    /// Run the hedge along `path`, a sequence of `T` state indices into
    /// `space`.
    pub fn run(
        values: &ValueProcess,
        deltas: &HedgeRatios,
        space: &ReturnSpace,
        s0: Price,
        rf: GrossReturn,
        payoff: &dyn Payoff,
        path: &[Size],
    ) -> Result<Self> {
        ensure_market(s0, rf)?;
        let horizon = values.horizon();
        if path.len() != horizon {
            return Err(Error::InvalidArgument(format!(
                "path has {} steps, horizon is {horizon}",
                path.len()
            )));
        }
        if let Some(&j) = path.iter().find(|&&j| j >= space.len()) {
            return Err(Error::InvalidArgument(format!(
                "state index {j} out of range [0, {})",
                space.len()
            )));
        }
        ensure!(
            deltas.periods() == horizon,
            "{} hedge periods for horizon {horizon}",
            deltas.periods()
        );

        let mut nodes = Vec::with_capacity(horizon + 1);
        let mut prices = Vec::with_capacity(horizon + 1);
        let mut wealth = Vec::with_capacity(horizon + 1);

        let mut x: Offset = 0;
        let mut st = s0;
        let mut vt = values.initial_value();
        nodes.push(x);
        prices.push(st);
        wealth.push(vt);

        for (t, &j) in path.iter().enumerate() {
            let delta = deltas
                .delta(t, x)
                .ok_or(Error::MissingNode { step: t, offset: x })?;
            x += space.offsets()[j];
            let next_price = s0 * space.growth_of(x);
            vt = rf * vt + delta * (next_price - rf * st);
            st = next_price;
            nodes.push(x);
            prices.push(st);
            wealth.push(vt);
        }

        let tracking_error = vt - payoff.value(st);
        Ok(Self {
            nodes,
            prices,
            wealth,
            tracking_error,
        })
    }

    /// Offsets visited, `x_0 = 0` through `x_T`.
    pub fn nodes(&self) -> &[Offset] {
        &self.nodes
    }

    /// Asset prices `S_0..S_T` along the path.
    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    /// Hedge portfolio values `V_0..V_T`.
    pub fn wealth(&self) -> &[Real] {
        &self.wealth
    }

    /// `V_T − payoff(S_T)`.
    pub fn tracking_error(&self) -> Real {
        self.tracking_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;
    use approx::assert_abs_diff_eq;
    use mvh_instruments::PlainVanillaPayoff;
    use mvh_math::StateVector;

    struct Fixture {
        space: ReturnSpace,
        values: ValueProcess,
        deltas: HedgeRatios,
        rf: Real,
        call: PlainVanillaPayoff,
    }

    fn complete_market(horizon: Size) -> Fixture {
        let space = ReturnSpace::new(vec![-0.02, 0.02], 100.0).unwrap();
        let levels = space.return_levels();
        let rf = 1.0005;
        let up = (rf - levels[0]) / (levels[1] - levels[0]);
        let q = StateVector::from_slice(&[1.0 - up, up]);
        let p = StateVector::from_slice(&[0.45, 0.55]);
        let lattice = Lattice::build(&space, horizon).unwrap();
        let call = PlainVanillaPayoff::call(100.0);
        let values = ValueProcess::compute(&lattice, &space, 100.0, rf, &q, &call).unwrap();
        let deltas =
            HedgeRatios::compute(&lattice, &values, &space, 100.0, rf, &levels, &p).unwrap();
        Fixture {
            space,
            values,
            deltas,
            rf,
            call,
        }
    }

    #[test]
    fn complete_market_hedge_is_perfect_on_every_path() {
        let f = complete_market(4);
        for bits in 0..16usize {
            let path: Vec<Size> = (0..4).map(|k| (bits >> k) & 1).collect();
            let replay =
                HedgeReplay::run(&f.values, &f.deltas, &f.space, 100.0, f.rf, &f.call, &path)
                    .unwrap();
            assert_abs_diff_eq!(replay.tracking_error(), 0.0, epsilon = 1e-9);
            assert_eq!(replay.wealth().len(), 5);
        }
    }

    #[test]
    fn path_bookkeeping() {
        let f = complete_market(3);
        let replay =
            HedgeReplay::run(&f.values, &f.deltas, &f.space, 100.0, f.rf, &f.call, &[1, 1, 0])
                .unwrap();
        assert_eq!(replay.nodes(), &[0, 2, 4, 2]);
        assert_abs_diff_eq!(replay.prices()[3], 100.0 * 0.02f64.exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(replay.wealth()[0], f.values.initial_value(), epsilon = 1e-15);
    }

    #[test]
    fn rejects_malformed_paths() {
        let f = complete_market(2);
        let short = HedgeReplay::run(&f.values, &f.deltas, &f.space, 100.0, f.rf, &f.call, &[0]);
        assert!(matches!(short, Err(Error::InvalidArgument(_))));
        let bad_state =
            HedgeReplay::run(&f.values, &f.deltas, &f.space, 100.0, f.rf, &f.call, &[0, 2]);
        assert!(matches!(bad_state, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_non_positive_market_inputs() {
        let f = complete_market(1);
        for (s0, rf) in [(0.0, f.rf), (-100.0, f.rf), (100.0, 0.0), (100.0, f64::NAN)] {
            let r = HedgeReplay::run(&f.values, &f.deltas, &f.space, s0, rf, &f.call, &[0]);
            assert!(matches!(r, Err(Error::Precondition(_))), "s0={s0}, rf={rf}");
        }
    }
}
