//! Analytic European formulas (Black-Scholes-Merton).
//!
//! $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
//! and $N$ is the standard normal CDF.

use ol_core::errors::Result;
use ol_core::{ensure, OptionType, Rate, Real, Time, Volatility};
use ol_math::distributions::normal_cdf;

/// Black-Scholes price of a European call or put on a non-dividend-paying
/// underlying.
///
/// # Errors
/// See [`black_scholes_merton`].
pub fn black_scholes(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Result<Real> {
    black_scholes_merton(
        option_type,
        spot,
        strike,
        risk_free_rate,
        0.0,
        volatility,
        time_to_expiry,
    )
}

/// Black-Scholes-Merton price of a European call or put with a continuous
/// dividend yield.
///
/// At `time_to_expiry == 0` the intrinsic value is returned.
///
/// # Errors
/// `InvalidArgument` if `spot` or `strike` is not positive (the formula takes
/// `ln(S/K)`), `volatility` is not positive, `time_to_expiry` is negative, or
/// any input is non-finite.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Result<Real> {
    check_inputs(spot, strike, risk_free_rate, dividend_yield, volatility, time_to_expiry)?;
    let t = time_to_expiry;
    if t == 0.0 {
        return Ok(option_type.intrinsic(spot, strike));
    }

    let phi = option_type.sign();
    let df_r = (-risk_free_rate * t).exp();
    let df_q = (-dividend_yield * t).exp();
    let (d1, d2) = d1_d2(spot, strike, risk_free_rate, dividend_yield, volatility, t);

    Ok(phi * (spot * df_q * normal_cdf(phi * d1) - strike * df_r * normal_cdf(phi * d2)))
}

/// European cash-or-nothing digital: pays `cash` at expiry if `φ(S_T − K) > 0`.
///
/// Value `cash · e^{−rT} · N(φ d₂)`.
///
/// # Errors
/// Same domain as [`black_scholes_merton`].
#[allow(clippy::too_many_arguments)]
pub fn cash_or_nothing(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    cash: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Result<Real> {
    check_inputs(spot, strike, risk_free_rate, dividend_yield, volatility, time_to_expiry)?;
    let t = time_to_expiry;
    let phi = option_type.sign();
    if t == 0.0 {
        return Ok(if phi * (spot - strike) > 0.0 { cash } else { 0.0 });
    }

    let (_, d2) = d1_d2(spot, strike, risk_free_rate, dividend_yield, volatility, t);
    Ok(cash * (-risk_free_rate * t).exp() * normal_cdf(phi * d2))
}

fn d1_d2(spot: Real, strike: Real, r: Rate, q: Rate, sigma: Volatility, t: Time) -> (Real, Real) {
    let std_dev = sigma * t.sqrt();
    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    (d1, d1 - std_dev)
}

fn check_inputs(
    spot: Real,
    strike: Real,
    r: Rate,
    q: Rate,
    sigma: Volatility,
    t: Time,
) -> Result<()> {
    ensure!(spot.is_finite() && spot > 0.0, "spot must be positive, got {spot}");
    ensure!(
        strike.is_finite() && strike > 0.0,
        "strike must be positive, got {strike}"
    );
    ensure!(
        sigma.is_finite() && sigma > 0.0,
        "volatility must be positive, got {sigma}"
    );
    ensure!(
        t.is_finite() && t >= 0.0,
        "time to expiry must be non-negative, got {t}"
    );
    ensure!(r.is_finite() && q.is_finite(), "rates must be finite");
    Ok(())
}
