//! Valuation tests for every contract kind.
//!
//! Reference lattice values were produced by an independent implementation
//! of the same Cox-Ross-Rubinstein recursion; closed-form references are
//! textbook Black-Scholes values.

use approx::assert_abs_diff_eq;
use ol_core::{Error, PricingSettings};
use ol_instruments::{BarrierType, CompoundTerms, Contract, OptionContract};
use proptest::prelude::*;

/// Black-Scholes call S=100, K=100, r=5%, σ=20%, T=1.
const BS_CALL: f64 = 10.450_583_572_185_572;
/// CRR lattice value of the same call with 250 steps.
const LATTICE_CALL_250: f64 = 10.442_588_712_622_292;

fn atm_call() -> OptionContract {
    OptionContract::european_call(100.0, 1.0, 0.2, 0.05).unwrap()
}

// ───────────────────────── European ─────────────────────────

#[test]
fn european_call_analytic_textbook_value() {
    let value = atm_call().analytic_value(100.0).unwrap();
    assert_abs_diff_eq!(value, BS_CALL, epsilon = 1e-8);
    assert_abs_diff_eq!(value, 10.45, epsilon = 1e-2);
}

#[test]
fn european_lattice_converges_in_n() {
    let call = atm_call();
    let errors: Vec<f64> = [50, 200, 1000]
        .iter()
        .map(|&n| (call.lattice_value(100.0, n, None).unwrap() - BS_CALL).abs())
        .collect();
    assert!(errors[0] > errors[1] && errors[1] > errors[2], "{errors:?}");
    assert!(errors[2] < 5e-3, "{errors:?}");

    let put = OptionContract::european_put(100.0, 1.0, 0.2, 0.05).unwrap();
    let bs = put.analytic_value(100.0).unwrap();
    let lattice = put.lattice_value(100.0, 1000, None).unwrap();
    assert_abs_diff_eq!(lattice, bs, epsilon = 5e-3);
}

#[test]
fn european_default_value_is_closed_form() {
    let call = atm_call();
    assert_eq!(call.value(100.0).unwrap(), call.analytic_value(100.0).unwrap());
}

// ───────────────────────── Knock-out ─────────────────────────

#[test]
fn far_barrier_knock_out_equals_vanilla() {
    let ko = OptionContract::knock_out_call(100.0, 1.0, 0.2, 0.05, 3.0).unwrap();
    assert_eq!(ko.barrier_type(), Some(BarrierType::DownOut));
    assert_abs_diff_eq!(ko.analytic_value(100.0).unwrap(), BS_CALL, epsilon = 1e-8);
    // no node of a 250-step tree reaches the barrier
    assert_abs_diff_eq!(
        ko.lattice_value(100.0, 250, None).unwrap(),
        LATTICE_CALL_250,
        epsilon = 1e-9
    );
    assert_eq!(
        ko.lattice_value(100.0, 250, None).unwrap(),
        atm_call().lattice_value(100.0, 250, None).unwrap()
    );
}

#[test]
fn binding_barrier_lowers_value() {
    let ko = OptionContract::knock_out_call(100.0, 1.0, 0.2, 0.05, 130.0).unwrap();
    assert_eq!(ko.barrier_type(), Some(BarrierType::UpOut));
    let analytic = ko.analytic_value(100.0).unwrap();
    let lattice = ko.lattice_value(100.0, 1000, None).unwrap();
    assert!(analytic < BS_CALL);
    // the payoff jumps at the barrier, so the tree converges slowly
    assert_abs_diff_eq!(lattice, analytic, epsilon = 0.25);
}

// ───────────────────────── American ─────────────────────────

#[test]
fn american_put_dominates_european() {
    let american = OptionContract::american_put(63.75, 1.0, 0.2, 0.04).unwrap();
    let european = OptionContract::european_put(63.75, 1.0, 0.2, 0.04).unwrap();

    let lattice = american.lattice_value(75.0, 250, None).unwrap();
    let analytic = european.analytic_value(75.0).unwrap();
    assert_abs_diff_eq!(lattice, 1.150_147_939_715_661_3, epsilon = 1e-9);
    assert_abs_diff_eq!(analytic, 1.099_046_010_787_319, epsilon = 1e-8);
    assert!(lattice >= analytic);
}

#[test]
fn american_call_without_dividends_is_european() {
    let american = OptionContract::american_call(100.0, 1.0, 0.2, 0.05).unwrap();
    assert_abs_diff_eq!(
        american.value(100.0).unwrap(),
        LATTICE_CALL_250,
        epsilon = 1e-10
    );
    // the closed form of an American contract is its European bound
    assert_abs_diff_eq!(american.analytic_value(100.0).unwrap(), BS_CALL, epsilon = 1e-8);
}

#[test]
fn american_call_with_dividends_exercises_early() {
    let american = OptionContract::american_call(100.0, 1.0, 0.2, 0.05).unwrap();
    let european = atm_call();
    let am = american.lattice_value(100.0, 500, Some(0.08)).unwrap();
    let eu = european.lattice_value(100.0, 500, Some(0.08)).unwrap();
    assert!(am > eu, "American {am} <= European {eu}");
}

// ───────────────────────── Exotics ─────────────────────────

#[test]
fn compound_call_value() {
    let compound = OptionContract::compound_call(2.5, 0.25, 0.25, 0.01).unwrap();
    assert_abs_diff_eq!(
        compound.lattice_value(80.0, 30, None).unwrap(),
        1.178_048_128_361_372_8,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        compound.value(80.0).unwrap(),
        1.163_623_563_272_868_2,
        epsilon = 1e-9
    );
}

#[test]
fn compound_inner_terms_are_configurable() {
    let default = OptionContract::compound_call(2.5, 0.25, 0.25, 0.01).unwrap();
    let explicit = OptionContract::compound_call_on(
        2.5,
        0.25,
        0.25,
        0.01,
        CompoundTerms {
            strike: 90.0,
            expiry: 0.5,
        },
    )
    .unwrap();
    assert_eq!(
        default.lattice_value(80.0, 30, None).unwrap(),
        explicit.lattice_value(80.0, 30, None).unwrap()
    );

    // a cheaper inner call makes the compound worth more
    let cheaper = OptionContract::compound_call_on(
        2.5,
        0.25,
        0.25,
        0.01,
        CompoundTerms {
            strike: 80.0,
            expiry: 0.5,
        },
    )
    .unwrap();
    assert!(
        cheaper.lattice_value(80.0, 30, None).unwrap()
            > default.lattice_value(80.0, 30, None).unwrap()
    );
}

#[test]
fn reloadable_call_value() {
    let reload = OptionContract::reloadable_call(110.0, 2.0, 0.32, 0.0195).unwrap();
    let value = reload.lattice_value(100.0, 20, None).unwrap();
    assert_abs_diff_eq!(value, 25.668_940_018_088_85, epsilon = 1e-8);

    // the reload right is worth more than the plain American call
    let plain = OptionContract::american_call(110.0, 2.0, 0.32, 0.0195).unwrap();
    assert!(value > plain.lattice_value(100.0, 20, None).unwrap());
}

#[test]
fn extendible_call_value() {
    let ext = OptionContract::extendible_call(73.0, 0.25, 0.25, 0.02).unwrap();
    assert_abs_diff_eq!(
        ext.lattice_value(75.0, 100, None).unwrap(),
        6.189_608_919_085_917,
        epsilon = 1e-7
    );
    assert_abs_diff_eq!(ext.value(75.0).unwrap(), 6.189_493_966_348_51, epsilon = 1e-7);
}

#[test]
fn exotics_have_no_closed_form() {
    let contracts = [
        OptionContract::compound_call(2.5, 0.25, 0.25, 0.01).unwrap(),
        OptionContract::reloadable_call(110.0, 2.0, 0.32, 0.0195).unwrap(),
        OptionContract::extendible_call(73.0, 0.25, 0.25, 0.02).unwrap(),
    ];
    for contract in &contracts {
        match contract.analytic_value(75.0) {
            Err(Error::UnsupportedOperation(msg)) => assert!(!msg.is_empty()),
            other => panic!("{}: expected UnsupportedOperation, got {other:?}", contract.kind()),
        }
    }
}

#[test]
fn settings_flow_into_nested_pricing() {
    let coarse = PricingSettings::default().with_compound_steps(10).unwrap();
    let compound = OptionContract::compound_call(2.5, 0.25, 0.25, 0.01).unwrap();
    let default = compound.lattice_value(80.0, 30, None).unwrap();
    let changed = compound
        .with_settings(coarse)
        .lattice_value(80.0, 30, None)
        .unwrap();
    assert_ne!(default, changed);
}

// ───────────────────────── Invalid input ─────────────────────────

#[test]
fn non_positive_steps_rejected() {
    for n in [0, -5] {
        let err = atm_call().lattice_value(100.0, n, None).unwrap_err();
        assert!(err.is_invalid_argument(), "N={n}: {err}");
    }
}

#[test]
fn steps_above_guard_rejected() {
    let settings = PricingSettings::default().with_max_steps(500).unwrap();
    let call = atm_call().with_settings(settings);
    assert!(call.lattice_value(100.0, 500, None).is_ok());
    assert!(call.lattice_value(100.0, 501, None).unwrap_err().is_invalid_argument());
}

#[test]
fn zero_maturity_rejected_by_lattice_only() {
    let call = OptionContract::european_call(100.0, 0.0, 0.2, 0.05).unwrap();
    assert!(call.lattice_value(110.0, 10, None).unwrap_err().is_invalid_argument());
    assert_abs_diff_eq!(call.analytic_value(110.0).unwrap(), 10.0, epsilon = 1e-15);
}

#[test]
fn overflowing_lattice_reports_runtime_error() {
    // the top nodes of a wide 1000-step tree overflow to infinity
    let call = OptionContract::european_call(100.0, 1.0, 0.6, 0.05).unwrap();
    match call.lattice_value(1e306, 1000, None) {
        Err(Error::Runtime(msg)) => assert!(msg.contains("not finite"), "{msg}"),
        other => panic!("expected Runtime error, got {other:?}"),
    }
}

#[test]
fn bad_terms_rejected() {
    assert!(OptionContract::european_call(0.0, 1.0, 0.2, 0.05).is_err());
    assert!(OptionContract::american_put(100.0, -1.0, 0.2, 0.05).is_err());
    assert!(OptionContract::extendible_call(100.0, 1.0, -0.2, 0.05).is_err());
    assert!(atm_call().analytic_value(0.0).unwrap_err().is_invalid_argument());
    assert!(atm_call().lattice_value(0.0, 10, None).unwrap_err().is_invalid_argument());
}

// ───────────────────────── Properties ─────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn lattice_values_non_negative(
        spot in 20.0..200.0f64,
        strike in 50.0..150.0f64,
        vol in 0.05..0.6f64,
        barrier in 30.0..250.0f64,
    ) {
        let contracts = [
            OptionContract::european_call(strike, 1.0, vol, 0.05).unwrap(),
            OptionContract::european_put(strike, 1.0, vol, 0.05).unwrap(),
            OptionContract::american_put(strike, 1.0, vol, 0.05).unwrap(),
            OptionContract::knock_out_call(strike, 1.0, vol, 0.05, barrier).unwrap(),
            OptionContract::knock_out_put(strike, 1.0, vol, 0.05, barrier).unwrap(),
        ];
        for contract in &contracts {
            prop_assert!(contract.lattice_value(spot, 60, None).unwrap() >= 0.0);
        }
    }

    #[test]
    fn american_at_least_european(
        spot in 40.0..160.0f64,
        strike in 60.0..140.0f64,
        t in 0.1..2.0f64,
    ) {
        for (am, eu) in [
            (
                OptionContract::american_put(strike, t, 0.25, 0.04).unwrap(),
                OptionContract::european_put(strike, t, 0.25, 0.04).unwrap(),
            ),
            (
                OptionContract::american_call(strike, t, 0.25, 0.04).unwrap(),
                OptionContract::european_call(strike, t, 0.25, 0.04).unwrap(),
            ),
        ] {
            let american = am.lattice_value(spot, 80, None).unwrap();
            let european = eu.lattice_value(spot, 80, None).unwrap();
            prop_assert!(american >= european - 1e-12, "{american} < {european}");
        }
    }

    #[test]
    fn knock_out_at_most_vanilla(
        spot in 50.0..150.0f64,
        barrier in 30.0..250.0f64,
    ) {
        let vanilla_call = atm_call();
        let vanilla_put = OptionContract::european_put(100.0, 1.0, 0.2, 0.05).unwrap();
        let ko_call = OptionContract::knock_out_call(100.0, 1.0, 0.2, 0.05, barrier).unwrap();
        let ko_put = OptionContract::knock_out_put(100.0, 1.0, 0.2, 0.05, barrier).unwrap();

        prop_assert!(
            ko_call.lattice_value(spot, 80, None).unwrap()
                <= vanilla_call.lattice_value(spot, 80, None).unwrap() + 1e-12
        );
        prop_assert!(
            ko_put.lattice_value(spot, 80, None).unwrap()
                <= vanilla_put.lattice_value(spot, 80, None).unwrap() + 1e-12
        );
        prop_assert!(
            ko_call.analytic_value(spot).unwrap()
                <= vanilla_call.analytic_value(spot).unwrap() + 1e-12
        );
        prop_assert!(
            ko_put.analytic_value(spot).unwrap()
                <= vanilla_put.analytic_value(spot).unwrap() + 1e-12
        );
    }
}

// ───────────────────────── Concurrency ─────────────────────────

#[test]
fn contracts_price_in_parallel_deterministically() {
    let contracts: Vec<Box<dyn Contract>> = vec![
        Box::new(OptionContract::american_put(63.75, 1.0, 0.2, 0.04).unwrap()),
        Box::new(OptionContract::extendible_call(73.0, 0.25, 0.25, 0.02).unwrap()),
        Box::new(OptionContract::compound_call(2.5, 0.25, 0.25, 0.01).unwrap()),
    ];
    let serial: Vec<f64> = contracts
        .iter()
        .map(|c| c.lattice_value(75.0, 60, None).unwrap())
        .collect();
    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = contracts
            .iter()
            .map(|c| scope.spawn(move || c.lattice_value(75.0, 60, None).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, parallel);
}
