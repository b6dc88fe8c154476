//! End-to-end tests of the lattice → measure → value → hedge pipeline.

use approx::assert_abs_diff_eq;
use mvh_core::{Error, Size};
use mvh_instruments::{CashOrNothingPayoff, FnPayoff, OptionType, Payoff, PlainVanillaPayoff};
use mvh_pricingengines::{MarketParametersBuilder, MeanVarianceHedgingEngine};
use proptest::prelude::*;

fn trinomial(horizon: Size, rf: f64) -> MeanVarianceHedgingEngine {
    let params = MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, vec![0.3, 0.3, 0.4])
        .with_horizon(horizon)
        .with_spot(100.0)
        .with_risk_free(rf)
        .build()
        .unwrap();
    MeanVarianceHedgingEngine::new(params).unwrap()
}

// ───────────────────────── lattice ─────────────────────────

#[test]
fn test_two_step_lattice() {
    let lattice = trinomial(2, 1.0).lattice().unwrap();
    let collect = |t| lattice.layer(t).unwrap().iter().copied().collect::<Vec<i64>>();
    assert_eq!(collect(0), vec![0]);
    assert_eq!(collect(1), vec![-2, 0, 2]);
    assert_eq!(collect(2), vec![-4, -2, 0, 2, 4]);
}

// ───────────────────────── value process ─────────────────────────

#[test]
fn test_at_the_money_terminal_node_pays_nothing() {
    let r = trinomial(2, 1.001).hedge(&PlainVanillaPayoff::call(100.0)).unwrap();
    assert_eq!(r.values().value(2, 0), Some(0.0));
}

#[test]
fn test_call_values_are_non_negative() {
    let r = trinomial(8, 1.001).hedge(&PlainVanillaPayoff::call(100.0)).unwrap();
    assert!(r.measure().is_proper());
    for (t, x) in r.lattice().iter() {
        assert!(r.values().value(t, x).unwrap() >= 0.0, "negative value at ({t}, {x})");
    }
}

#[test]
fn test_put_call_parity_under_the_pricing_measure() {
    // Linearity of the q-expectation: C − P = E_q[S_T − K] / rf^T.
    let horizon = 6;
    let rf: f64 = 1.001;
    let engine = trinomial(horizon, rf);
    let call = engine.hedge(&PlainVanillaPayoff::call(100.0)).unwrap();
    let put = engine.hedge(&PlainVanillaPayoff::put(100.0)).unwrap();
    let forward = engine.hedge(&FnPayoff::new("Forward", |s| s - 100.0)).unwrap();

    assert_abs_diff_eq!(
        call.values().initial_value() - put.values().initial_value(),
        forward.values().initial_value(),
        epsilon = 1e-10
    );

    let q = call.measure().q_probs();
    let growth: f64 = engine
        .return_space()
        .return_levels()
        .iter()
        .zip(q.iter())
        .map(|(r, q)| r * q)
        .sum();
    let expected = (100.0 * growth.powi(horizon as i32) - 100.0) / rf.powi(horizon as i32);
    assert_abs_diff_eq!(forward.values().initial_value(), expected, epsilon = 1e-9);
}

#[test]
fn test_digital_value_is_discounted_probability_of_finishing_in_the_money() {
    let horizon = 4;
    let rf: f64 = 1.001;
    let engine = trinomial(horizon, rf);
    let digital = CashOrNothingPayoff::new(OptionType::Call, 100.0, 1.0);
    let results = engine.hedge(&digital).unwrap();

    // Enumerate all 3^T paths; S_T > 100 exactly when the terminal offset is positive.
    let q = results.measure().q_probs();
    let offsets = engine.return_space().offsets();
    let mut in_the_money = 0.0;
    for n in 0..3usize.pow(horizon as u32) {
        let (mut x, mut weight, mut k) = (0i64, 1.0, n);
        for _ in 0..horizon {
            x += offsets[k % 3];
            weight *= q[k % 3];
            k /= 3;
        }
        if x > 0 {
            in_the_money += weight;
        }
    }

    assert_abs_diff_eq!(
        results.values().initial_value(),
        in_the_money / rf.powi(horizon as i32),
        epsilon = 1e-12
    );
    assert!(results.deltas().initial_delta().unwrap() > 0.0);
}

// ───────────────────────── hedging ─────────────────────────

#[test]
fn test_complete_market_hedge_replicates_the_claim() {
    // Symmetric binomial with E_p[R] = rf: the variance-optimal measure is p
    // itself and the market is complete.
    let rf = 0.02f64.cosh();
    let params = MarketParametersBuilder::new(vec![-0.02, 0.02], 100.0, vec![0.5, 0.5])
        .with_horizon(5)
        .with_risk_free(rf)
        .build()
        .unwrap();
    let engine = MeanVarianceHedgingEngine::new(params).unwrap();
    let call = PlainVanillaPayoff::call(100.0);
    let results = engine.hedge(&call).unwrap();

    assert_abs_diff_eq!(results.measure().q_probs()[0], 0.5, epsilon = 1e-12);
    for bits in 0..32usize {
        let path: Vec<Size> = (0..5).map(|k| (bits >> k) & 1).collect();
        let replay = engine.replay(&results, &call, &path).unwrap();
        assert_abs_diff_eq!(replay.tracking_error(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_incomplete_market_hedge_leaves_residual_risk() {
    let engine = trinomial(3, 1.0);
    let call = PlainVanillaPayoff::call(100.0);
    let results = engine.hedge(&call).unwrap();
    let worst = (0..27usize)
        .map(|n| vec![n % 3, (n / 3) % 3, n / 9])
        .map(|path| engine.replay(&results, &call, &path).unwrap().tracking_error().abs())
        .fold(0.0, f64::max);
    assert!(worst > 1e-6);
    assert!(worst < call.value(100.0 * 0.06f64.exp()));
}

#[test]
fn test_call_delta_is_between_zero_and_one() {
    // The pricing measure is only approximately a martingale measure, so
    // deep in-the-money deltas may overshoot one by a little.
    let r = trinomial(6, 1.001).hedge(&PlainVanillaPayoff::call(100.0)).unwrap();
    for t in 0..6 {
        for (&x, &d) in r.deltas().layer(t).unwrap() {
            assert!((-1e-3..=1.0 + 1e-3).contains(&d), "delta {d} at ({t}, {x})");
        }
    }
}

// ───────────────────────── failure modes ─────────────────────────

#[test]
fn test_riskless_asset_is_a_degenerate_market() {
    let rf = 1.001;
    let params = MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, vec![0.3, 0.3, 0.4])
        .with_horizon(3)
        .with_risk_free(rf)
        .with_return_levels(vec![rf; 3])
        .build()
        .unwrap();
    let engine = MeanVarianceHedgingEngine::new(params).unwrap();
    let err = engine.hedge(&PlainVanillaPayoff::call(100.0)).unwrap_err();
    assert!(matches!(err, Error::DegenerateMarket(_)));
    assert!(!err.is_invariant_violation());
}

#[test]
fn test_tiny_spot_is_not_a_degenerate_market() {
    let hedge_at = |spot: f64| {
        let params =
            MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, vec![0.3, 0.3, 0.4])
                .with_horizon(3)
                .with_spot(spot)
                .with_risk_free(1.001)
                .build()
                .unwrap();
        MeanVarianceHedgingEngine::new(params)
            .unwrap()
            .hedge(&PlainVanillaPayoff::call(spot))
            .unwrap()
            .deltas()
            .initial_delta()
            .unwrap()
    };
    let reference = hedge_at(100.0);
    assert_abs_diff_eq!(hedge_at(1e-12), reference, epsilon = 1e-9);
}

#[test]
fn test_non_integral_scale_fails_before_computing() {
    let err = MarketParametersBuilder::new(vec![-0.025, 0.025], 10.0, vec![0.5, 0.5])
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

// ───────────────────────── purity ─────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_pipeline_is_a_pure_function(
        w in proptest::collection::vec(0.05f64..1.0, 3),
        horizon in 1usize..6,
        strike in 90.0f64..110.0,
    ) {
        let total: f64 = w.iter().sum();
        let probs: Vec<f64> = w.iter().map(|x| x / total).collect();
        let build = || {
            let params = MarketParametersBuilder::new(vec![-0.02, 0.0, 0.02], 100.0, probs.clone())
                .with_horizon(horizon)
                .with_risk_free(1.0005)
                .build()
                .unwrap();
            MeanVarianceHedgingEngine::new(params).unwrap()
        };
        let call = PlainVanillaPayoff::call(strike);
        let first = build().hedge(&call);
        let second = build().hedge(&call);
        prop_assert_eq!(first, second);
    }
}
