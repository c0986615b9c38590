//! Option contracts.
//!
//! [`OptionContract`] pairs validated [`ContractTerms`] with a
//! [`ContractKind`] that selects the exercise rule:
//!
//! | Kind | `exercise_value(s, t)` |
//! |---|---|
//! | European call / put | intrinsic at `t = T`, else `0` |
//! | American call / put | intrinsic at every `t` |
//! | Knock-out call / put | intrinsic at `t = T` unless the barrier is breached, else `0` |
//! | Compound call | `max(V − K, 0)` at `t = T`, `V` a nested European call value |
//! | Reloadable call | `max(s − K, 0) + (K/s)·C(s, T − t)` before `T`, intrinsic at `T` |
//! | Extendible call | `max(s − K, BS call(K + 1, T))` at every `t` |
//!
//! The compound, reloadable and extendible kinds price a freshly built inner
//! contract inside their exercise rule. The inner contract is constructed
//! per call from plain values and dropped before the rule returns.

use crate::contract::{price_on_lattice, Contract, ContractTerms};
use crate::exercise::ExerciseStyle;
use ol_core::errors::Result;
use ol_core::{
    ensure, unsupported, BarrierType, OptionType, PricingSettings, Rate, Real, Time, Volatility,
};
use ol_math::close;
use ol_pricingengines::{black_scholes, knock_out_at_expiry};
use std::fmt;
use tracing::{debug, trace};

/// Strike increment of the contract an extendible call can be extended into.
pub const EXTENSION_STRIKE_STEP: Real = 1.0;

/// Tolerance when matching a lattice time against the maturity.
const MATURITY_TOLERANCE: Time = 1e-12;

// ────────────────────────────────────────────────────────────────────────────
// Kinds
// ────────────────────────────────────────────────────────────────────────────

/// Inner European call delivered by a compound call.
///
/// The defaults (strike 90, expiry six months) are a fixed modelling choice
/// rather than market terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundTerms {
    /// Strike of the inner call.
    pub strike: Real,
    /// Expiry of the inner call, measured from today in years.
    pub expiry: Time,
}

impl Default for CompoundTerms {
    fn default() -> Self {
        Self {
            strike: 90.0,
            expiry: 0.5,
        }
    }
}

/// The exercise rule of an [`OptionContract`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContractKind {
    /// Exercisable at maturity only.
    European(OptionType),
    /// Exercisable at any time up to maturity.
    American(OptionType),
    /// European payoff extinguished when the spot at maturity lies beyond
    /// the barrier.
    KnockOut {
        /// Call or put.
        option_type: OptionType,
        /// Barrier level.
        barrier: Real,
    },
    /// European call whose underlying is another European call.
    CompoundCall(CompoundTerms),
    /// American call that grants `K/s` new at-the-strike calls on early
    /// exercise.
    ReloadableCall,
    /// American call whose holder may instead take a call struck one unit
    /// higher.
    ExtendibleCall,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::European(ty) => write!(f, "European {ty}"),
            ContractKind::American(ty) => write!(f, "American {ty}"),
            ContractKind::KnockOut {
                option_type,
                barrier,
            } => write!(f, "Knock-out {option_type} @ {barrier}"),
            ContractKind::CompoundCall(inner) => {
                write!(f, "Compound Call on Call({} @ {})", inner.strike, inner.expiry)
            }
            ContractKind::ReloadableCall => write!(f, "Reloadable Call"),
            ContractKind::ExtendibleCall => write!(f, "Extendible Call"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OptionContract
// ────────────────────────────────────────────────────────────────────────────

/// An option on a single underlying.
///
/// # Example
/// ```
/// use ol_instruments::{Contract, OptionContract};
/// let call = OptionContract::european_call(100.0, 1.0, 0.2, 0.05).unwrap();
/// let bs = call.analytic_value(100.0).unwrap();
/// let tree = call.lattice_value(100.0, 500, None).unwrap();
/// assert!((bs - 10.4506).abs() < 1e-4);
/// assert!((tree - bs).abs() < 0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionContract {
    terms: ContractTerms,
    kind: ContractKind,
    settings: PricingSettings,
}

impl OptionContract {
    /// Build a contract from validated terms.
    ///
    /// # Errors
    /// `InvalidArgument` for a non-positive barrier, or a compound inner call
    /// that does not expire after the compound's own maturity.
    pub fn new(terms: ContractTerms, kind: ContractKind) -> Result<Self> {
        match kind {
            ContractKind::KnockOut { barrier, .. } => {
                ensure!(
                    barrier.is_finite() && barrier > 0.0,
                    "barrier must be positive, got {barrier}"
                );
            }
            ContractKind::CompoundCall(inner) => {
                ensure!(
                    inner.strike.is_finite() && inner.strike > 0.0,
                    "compound inner strike must be positive, got {}",
                    inner.strike
                );
                ensure!(
                    inner.expiry.is_finite() && inner.expiry > terms.maturity(),
                    "compound inner call must expire after {} years, got {}",
                    terms.maturity(),
                    inner.expiry
                );
            }
            _ => {}
        }
        Ok(Self {
            terms,
            kind,
            settings: PricingSettings::default(),
        })
    }

    /// European call or put.
    pub fn european(
        option_type: OptionType,
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        risk_free_rate: Rate,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, maturity, volatility, risk_free_rate)?;
        Self::new(terms, ContractKind::European(option_type))
    }

    /// European call.
    pub fn european_call(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        Self::european(OptionType::Call, strike, maturity, volatility, rate)
    }

    /// European put.
    pub fn european_put(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        Self::european(OptionType::Put, strike, maturity, volatility, rate)
    }

    /// American call or put.
    pub fn american(
        option_type: OptionType,
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        risk_free_rate: Rate,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, maturity, volatility, risk_free_rate)?;
        Self::new(terms, ContractKind::American(option_type))
    }

    /// American call.
    pub fn american_call(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        Self::american(OptionType::Call, strike, maturity, volatility, rate)
    }

    /// American put.
    pub fn american_put(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        Self::american(OptionType::Put, strike, maturity, volatility, rate)
    }

    /// Knock-out call or put.
    ///
    /// A barrier below the strike is down-and-out; a barrier at or above the
    /// strike is up-and-out.
    pub fn knock_out(
        option_type: OptionType,
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        risk_free_rate: Rate,
        barrier: Real,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, maturity, volatility, risk_free_rate)?;
        Self::new(
            terms,
            ContractKind::KnockOut {
                option_type,
                barrier,
            },
        )
    }

    /// Knock-out call.
    pub fn knock_out_call(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
        barrier: Real,
    ) -> Result<Self> {
        Self::knock_out(OptionType::Call, strike, maturity, volatility, rate, barrier)
    }

    /// Knock-out put.
    pub fn knock_out_put(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
        barrier: Real,
    ) -> Result<Self> {
        Self::knock_out(OptionType::Put, strike, maturity, volatility, rate, barrier)
    }

    /// Compound call on the default inner European call (strike 90, six
    /// months).
    pub fn compound_call(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        Self::compound_call_on(strike, maturity, volatility, rate, CompoundTerms::default())
    }

    /// Compound call on a European call with the given inner terms.
    pub fn compound_call_on(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
        inner: CompoundTerms,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, maturity, volatility, rate)?;
        Self::new(terms, ContractKind::CompoundCall(inner))
    }

    /// Reloadable American call.
    pub fn reloadable_call(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, maturity, volatility, rate)?;
        Self::new(terms, ContractKind::ReloadableCall)
    }

    /// Extendible American call.
    pub fn extendible_call(
        strike: Real,
        maturity: Time,
        volatility: Volatility,
        rate: Rate,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, maturity, volatility, rate)?;
        Self::new(terms, ContractKind::ExtendibleCall)
    }

    /// Replace the pricing settings.
    pub fn with_settings(mut self, settings: PricingSettings) -> Self {
        self.settings = settings;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The exercise rule.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Call or put. Compound, reloadable and extendible contracts are calls.
    pub fn option_type(&self) -> OptionType {
        match self.kind {
            ContractKind::European(ty) | ContractKind::American(ty) => ty,
            ContractKind::KnockOut { option_type, .. } => option_type,
            ContractKind::CompoundCall(_)
            | ContractKind::ReloadableCall
            | ContractKind::ExtendibleCall => OptionType::Call,
        }
    }

    /// Barrier level of a knock-out.
    pub fn barrier(&self) -> Option<Real> {
        match self.kind {
            ContractKind::KnockOut { barrier, .. } => Some(barrier),
            _ => None,
        }
    }

    /// Barrier direction of a knock-out.
    pub fn barrier_type(&self) -> Option<BarrierType> {
        self.barrier()
            .map(|barrier| BarrierType::from_strike(self.terms.strike(), barrier))
    }

    // ── Exercise rules ───────────────────────────────────────────────────

    fn is_maturity(&self, time: Time) -> bool {
        close(time, self.terms.maturity(), MATURITY_TOLERANCE)
    }

    fn intrinsic(&self, option_type: OptionType, spot: Real) -> Real {
        option_type.intrinsic(spot, self.terms.strike())
    }

    /// Value at `spot` of the inner call a compound call delivers.
    fn compound_underlying(&self, inner: CompoundTerms, spot: Real) -> Result<Real> {
        let t = &self.terms;
        let underlying = OptionContract::european_call(
            inner.strike,
            inner.expiry - t.maturity(),
            t.volatility(),
            t.risk_free_rate(),
        )?
        .with_settings(self.settings);
        trace!(
            spot,
            steps = self.settings.compound_steps(),
            "pricing compound underlying"
        );
        price_on_lattice(&underlying, spot, self.settings.compound_steps(), None)
    }

    /// Value at `spot` of one freshly granted call expiring at the original
    /// maturity.
    fn reload_grant(&self, spot: Real, time: Time) -> Result<Real> {
        let t = &self.terms;
        let grant = OptionContract::european_call(
            t.strike(),
            t.maturity() - time,
            t.volatility(),
            t.risk_free_rate(),
        )?
        .with_settings(self.settings);
        trace!(
            spot,
            time,
            steps = self.settings.reload_steps(),
            "pricing reload grant"
        );
        price_on_lattice(&grant, spot, self.settings.reload_steps(), None)
    }

    /// Black-Scholes value at `spot` of the call the holder may extend into.
    fn extension(&self, spot: Real) -> Result<Real> {
        let t = &self.terms;
        OptionContract::american_call(
            t.strike() + EXTENSION_STRIKE_STEP,
            t.maturity(),
            t.volatility(),
            t.risk_free_rate(),
        )?
        .analytic_value(spot)
    }
}

impl Contract for OptionContract {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    fn exercise_style(&self) -> ExerciseStyle {
        match self.kind {
            ContractKind::European(_)
            | ContractKind::KnockOut { .. }
            | ContractKind::CompoundCall(_) => ExerciseStyle::European,
            ContractKind::American(_)
            | ContractKind::ReloadableCall
            | ContractKind::ExtendibleCall => ExerciseStyle::American,
        }
    }

    fn exercise_value(&self, spot: Real, time: Time) -> Result<Real> {
        match self.kind {
            ContractKind::European(ty) => Ok(if self.is_maturity(time) {
                self.intrinsic(ty, spot)
            } else {
                0.0
            }),
            ContractKind::American(ty) => Ok(self.intrinsic(ty, spot)),
            ContractKind::KnockOut {
                option_type,
                barrier,
            } => {
                let breached = BarrierType::from_strike(self.terms.strike(), barrier)
                    .is_breached(spot, barrier);
                Ok(if self.is_maturity(time) && !breached {
                    self.intrinsic(option_type, spot)
                } else {
                    0.0
                })
            }
            ContractKind::CompoundCall(inner) => {
                if !self.is_maturity(time) {
                    return Ok(0.0);
                }
                let underlying = self.compound_underlying(inner, spot)?;
                Ok((underlying - self.terms.strike()).max(0.0))
            }
            ContractKind::ReloadableCall => {
                let call_part = self.intrinsic(OptionType::Call, spot);
                if self.is_maturity(time) {
                    return Ok(call_part);
                }
                let grants = self.terms.strike() / spot;
                Ok(call_part + grants * self.reload_grant(spot, time)?)
            }
            ContractKind::ExtendibleCall => {
                let exercised = spot - self.terms.strike();
                Ok(exercised.max(self.extension(spot)?))
            }
        }
    }

    fn analytic_value(&self, spot: Real) -> Result<Real> {
        let t = &self.terms;
        match self.kind {
            ContractKind::European(ty) | ContractKind::American(ty) => black_scholes(
                ty,
                spot,
                t.strike(),
                t.risk_free_rate(),
                t.volatility(),
                t.maturity(),
            ),
            ContractKind::KnockOut {
                option_type,
                barrier,
            } => knock_out_at_expiry(
                option_type,
                BarrierType::from_strike(t.strike(), barrier),
                spot,
                t.strike(),
                barrier,
                t.risk_free_rate(),
                t.volatility(),
                t.maturity(),
            ),
            ContractKind::CompoundCall(_)
            | ContractKind::ReloadableCall
            | ContractKind::ExtendibleCall => {
                unsupported!("no closed-form value for a {} contract", self.kind)
            }
        }
    }

    fn value(&self, spot: Real) -> Result<Real> {
        match self.kind {
            ContractKind::European(_) => {
                debug!(kind = %self.kind, spot, "valuing in closed form");
                self.analytic_value(spot)
            }
            _ => {
                let steps = self.settings.default_steps();
                debug!(kind = %self.kind, spot, steps, "valuing on lattice");
                price_on_lattice(self, spot, steps, None)
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
