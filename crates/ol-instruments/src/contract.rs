//! The `Contract` trait and the terms every contract shares.
//!
//! A contract is immutable data plus behaviour. Terms are validated once at
//! construction; pricing calls borrow the contract and allocate their own
//! lattice, so one contract can be priced from several threads at once.

use crate::exercise::ExerciseStyle;
use ol_core::errors::Result;
use ol_core::{ensure, fail, Integer, PricingSettings, Rate, Real, Size, Time, Volatility};
use ol_methods::{roll_back, BinomialTree};
use tracing::trace;

/// Strike, maturity, volatility and rate of a contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractTerms {
    strike: Real,
    maturity: Time,
    volatility: Volatility,
    risk_free_rate: Rate,
}

impl ContractTerms {
    /// Validate and bundle contract terms.
    ///
    /// # Errors
    /// `InvalidArgument` unless `strike > 0`, `maturity >= 0`,
    /// `volatility > 0` and all values are finite.
    pub fn new(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        risk_free_rate: Rate,
    ) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be positive, got {strike}"
        );
        ensure!(
            maturity.is_finite() && maturity >= 0.0,
            "time to maturity must be non-negative, got {maturity}"
        );
        ensure!(
            volatility.is_finite() && volatility > 0.0,
            "volatility must be positive, got {volatility}"
        );
        ensure!(
            risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {risk_free_rate}"
        );
        Ok(Self {
            strike,
            maturity,
            volatility,
            risk_free_rate,
        })
    }

    /// Strike `K`.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Time to maturity `T` in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Annualised volatility `σ`.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Continuously compounded risk-free rate `r`.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }
}

/// Valuation interface shared by every option contract.
///
/// Implementors supply the exercise rule and the closed form; the lattice
/// valuation is provided on top of the exercise rule.
pub trait Contract: std::fmt::Debug + Send + Sync {
    /// The contract's terms.
    fn terms(&self) -> &ContractTerms;

    /// Step counts and guards used when pricing this contract.
    fn settings(&self) -> &PricingSettings;

    /// When the right can be exercised.
    fn exercise_style(&self) -> ExerciseStyle;

    /// Payoff of exercising at `time` with the underlying at `spot`.
    ///
    /// European-style contracts return `0` unless `time` is the maturity.
    fn exercise_value(&self, spot: Real, time: Time) -> Result<Real>;

    /// Closed-form value at `spot`.
    ///
    /// # Errors
    /// `UnsupportedOperation` for contracts without a closed form;
    /// `InvalidArgument` for a non-positive spot.
    fn analytic_value(&self, spot: Real) -> Result<Real>;

    /// The contract's default valuation at `spot`.
    fn value(&self, spot: Real) -> Result<Real>;

    /// Binomial-lattice value at `spot` with `steps` time steps and an
    /// optional continuous dividend yield.
    ///
    /// # Errors
    /// `InvalidArgument` if `steps <= 0`, `steps` exceeds the configured
    /// `max_steps`, the maturity is zero, or the spot is not positive. No
    /// lattice is built in these cases.
    fn lattice_value(
        &self,
        spot: Real,
        steps: Integer,
        dividend_yield: Option<Rate>,
    ) -> Result<Real> {
        ensure!(steps > 0, "lattice step count must be positive, got {steps}");
        price_on_lattice(self, spot, steps as Size, dividend_yield)
    }
}

/// Roll `contract`'s exercise rule back through a fresh binomial tree.
pub(crate) fn price_on_lattice<C>(
    contract: &C,
    spot: Real,
    steps: Size,
    dividend_yield: Option<Rate>,
) -> Result<Real>
where
    C: Contract + ?Sized,
{
    let max_steps = contract.settings().max_steps();
    ensure!(
        steps <= max_steps,
        "lattice step count {steps} exceeds max_steps {max_steps}"
    );
    let terms = contract.terms();
    let tree = BinomialTree::cox_ross_rubinstein(
        spot,
        terms.maturity(),
        terms.volatility(),
        terms.risk_free_rate(),
        dividend_yield,
        steps,
    )?;
    trace!(spot, steps, maturity = terms.maturity(), "lattice valuation");
    let value = roll_back(&tree, |s, t| contract.exercise_value(s, t))?;
    if !value.is_finite() {
        fail!("lattice valuation at spot {spot} with {steps} steps is not finite");
    }
    Ok(value)
}
