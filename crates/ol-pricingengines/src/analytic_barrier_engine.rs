//! Analytic knock-out formula for a barrier checked at expiry only.
//!
//! The payoff `max(φ(S_T − K), 0) · 1{S_T not beyond B}` depends on the
//! terminal spot alone, so it is replicated exactly by vanillas and
//! cash-or-nothing digitals struck at `K` and `B`:
//!
//! | Barrier | Call | Put |
//! |---|---|---|
//! | down-and-out, `K ≥ B` | `C(K)` | `P(K) − P(B) − (K − B)·D_put(B)` |
//! | down-and-out, `K < B` | `C(B) + (B − K)·D_call(B)` | `0` |
//! | up-and-out, `K ≤ B` | `C(K) − C(B) − (B − K)·D_call(B)` | `P(K)` |
//! | up-and-out, `K > B` | `0` | `P(B) + (K − B)·D_put(B)` |
//!
//! where `D` is a unit cash-or-nothing digital.

use crate::analytic_european_engine::{black_scholes, cash_or_nothing};
use ol_core::errors::Result;
use ol_core::{ensure, BarrierType, OptionType, Rate, Real, Time, Volatility};

/// Value of a European knock-out whose barrier is monitored at expiry.
///
/// # Errors
/// `InvalidArgument` if `barrier` is not positive, or on any input rejected
/// by [`black_scholes`].
#[allow(clippy::too_many_arguments)]
pub fn knock_out_at_expiry(
    option_type: OptionType,
    barrier_type: BarrierType,
    spot: Real,
    strike: Real,
    barrier: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Result<Real> {
    ensure!(
        barrier.is_finite() && barrier > 0.0,
        "barrier must be positive, got {barrier}"
    );
    let vanilla = |ty: OptionType, k: Real| {
        black_scholes(ty, spot, k, risk_free_rate, volatility, time_to_expiry)
    };
    let digital = |ty: OptionType| {
        cash_or_nothing(ty, spot, barrier, 1.0, risk_free_rate, 0.0, volatility, time_to_expiry)
    };

    let (k, b) = (strike, barrier);
    let plain = vanilla(option_type, k)?;
    let value = match (barrier_type, option_type) {
        (BarrierType::DownOut, OptionType::Call) if k >= b => plain,
        (BarrierType::DownOut, OptionType::Call) => {
            vanilla(OptionType::Call, b)? + (b - k) * digital(OptionType::Call)?
        }
        (BarrierType::DownOut, OptionType::Put) if k > b => {
            plain - vanilla(OptionType::Put, b)? - (k - b) * digital(OptionType::Put)?
        }
        (BarrierType::DownOut, OptionType::Put) => 0.0,
        (BarrierType::UpOut, OptionType::Call) if k < b => {
            plain - vanilla(OptionType::Call, b)? - (b - k) * digital(OptionType::Call)?
        }
        (BarrierType::UpOut, OptionType::Call) => 0.0,
        (BarrierType::UpOut, OptionType::Put) if k <= b => plain,
        (BarrierType::UpOut, OptionType::Put) => {
            vanilla(OptionType::Put, b)? + (k - b) * digital(OptionType::Put)?
        }
    };

    // replication differences can leave rounding noise below zero
    Ok(value.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ol_methods::{price_european, BinomialTree};

    const S: Real = 100.0;
    const R: Rate = 0.05;
    const VOL: Volatility = 0.20;
    const T: Time = 1.0;

    fn ko(ty: OptionType, bt: BarrierType, k: Real, b: Real) -> Real {
        knock_out_at_expiry(ty, bt, S, k, b, R, VOL, T).unwrap()
    }

    fn lattice_ko(ty: OptionType, bt: BarrierType, k: Real, b: Real) -> Real {
        let tree = BinomialTree::cox_ross_rubinstein(S, T, VOL, R, None, 1000).unwrap();
        price_european(&tree, &|s: Real| {
            if bt.is_breached(s, b) {
                0.0
            } else {
                ty.intrinsic(s, k)
            }
        })
        .unwrap()
    }

    #[test]
    fn far_down_barrier_is_vanilla() {
        let vanilla = black_scholes(OptionType::Call, S, 100.0, R, VOL, T).unwrap();
        assert_abs_diff_eq!(
            ko(OptionType::Call, BarrierType::DownOut, 100.0, 3.0),
            vanilla,
            epsilon = 1e-12
        );
    }

    #[test]
    fn up_and_out_call_reference() {
        let value = ko(OptionType::Call, BarrierType::UpOut, 100.0, 120.0);
        assert_abs_diff_eq!(value, 2.957_825_093_299_447, epsilon = 1e-8);
        let lattice = lattice_ko(OptionType::Call, BarrierType::UpOut, 100.0, 120.0);
        assert_abs_diff_eq!(lattice, value, epsilon = 0.1);
    }

    #[test]
    fn down_and_out_put_reference() {
        let value = ko(OptionType::Put, BarrierType::DownOut, 100.0, 90.0);
        assert_abs_diff_eq!(value, 0.892_341_571_451_041_6, epsilon = 1e-8);
        let lattice = lattice_ko(OptionType::Put, BarrierType::DownOut, 100.0, 90.0);
        assert_abs_diff_eq!(lattice, value, epsilon = 0.1);
    }

    #[test]
    fn cross_placed_barriers_agree_with_lattice() {
        // down-and-out call struck below the barrier, up-and-out put struck above it
        for (ty, bt, k, b) in [
            (OptionType::Call, BarrierType::DownOut, 90.0, 95.0),
            (OptionType::Put, BarrierType::UpOut, 110.0, 105.0),
        ] {
            let value = ko(ty, bt, k, b);
            let lattice = lattice_ko(ty, bt, k, b);
            assert_abs_diff_eq!(lattice, value, epsilon = 0.1);
        }
    }

    #[test]
    fn barrier_on_wrong_side_extinguishes() {
        assert_eq!(ko(OptionType::Put, BarrierType::DownOut, 90.0, 95.0), 0.0);
        assert_eq!(ko(OptionType::Call, BarrierType::UpOut, 110.0, 105.0), 0.0);
    }

    #[test]
    fn knock_out_never_exceeds_vanilla() {
        for b in [60.0, 80.0, 95.0, 100.0, 105.0, 130.0, 200.0] {
            for ty in [OptionType::Call, OptionType::Put] {
                let bt = BarrierType::from_strike(100.0, b);
                let vanilla = black_scholes(ty, S, 100.0, R, VOL, T).unwrap();
                assert!(ko(ty, bt, 100.0, b) <= vanilla + 1e-12, "{ty} B={b}");
            }
        }
    }

    #[test]
    fn rejects_non_positive_barrier() {
        let err = knock_out_at_expiry(OptionType::Call, BarrierType::DownOut, S, 100.0, 0.0, R, VOL, T)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
