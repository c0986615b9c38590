//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! Node `(i, j)` sits at time `i·Δt` after `j` up-moves and `i − j`
//! down-moves, so its underlying value is `S₀ · u^(2j − i)` with `d = 1/u`.
//!
//! | Quantity | Value |
//! |---|---|
//! | `Δt` | `T / N` |
//! | `u` | `exp(σ √Δt)` |
//! | `d` | `1 / u` |
//! | `p_up` | `(exp((r − q) Δt) − d) / (u − d)` |
//! | per-step discount | `exp(−r Δt)` |

use ol_core::errors::Result;
use ol_core::{ensure, DiscountFactor, Probability, Rate, Real, Size, Time, Volatility};

/// Largest step count whose node exponents fit in `i32`.
const MAX_TREE_STEPS: Size = (i32::MAX / 2) as Size;

/// A recombining binomial tree for a lognormal underlying.
///
/// The tree has `steps + 1` time layers, with layer `i` having `i + 1`
/// nodes. Probabilities and the discount factor are the same at every node.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    end: Time,
    dt: Time,
    steps: Size,
    up: Real,
    down: Real,
    pu: Probability,
    pd: Probability,
    discount: DiscountFactor,
}

impl BinomialTree {
    /// Build a Cox-Ross-Rubinstein tree.
    ///
    /// `dividend_yield` is a continuous yield `q`; `None` prices with the
    /// risk-free growth rate alone.
    ///
    /// # Errors
    /// [`ol_core::Error::InvalidArgument`] if `steps == 0`, `end <= 0`,
    /// `volatility <= 0`, `spot <= 0`, any input is non-finite, or the
    /// resulting up-probability falls outside `[0, 1]` (too few steps for the
    /// given drift).
    pub fn cox_ross_rubinstein(
        spot: Real,
        end: Time,
        volatility: Volatility,
        risk_free_rate: Rate,
        dividend_yield: Option<Rate>,
        steps: Size,
    ) -> Result<Self> {
        ensure!(steps > 0, "lattice step count must be positive");
        ensure!(
            steps <= MAX_TREE_STEPS,
            "lattice step count {steps} is too large"
        );
        ensure!(
            end.is_finite() && end > 0.0,
            "lattice needs a positive time to maturity, got {end}"
        );
        ensure!(
            volatility.is_finite() && volatility > 0.0,
            "volatility must be positive, got {volatility}"
        );
        ensure!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive, got {spot}"
        );
        ensure!(risk_free_rate.is_finite(), "risk-free rate must be finite");

        let growth_rate = match dividend_yield {
            Some(q) => {
                ensure!(q.is_finite(), "dividend yield must be finite");
                risk_free_rate - q
            }
            None => risk_free_rate,
        };

        let dt = end / steps as Real;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let pu = ((growth_rate * dt).exp() - down) / (up - down);
        ensure!(
            (0.0..=1.0).contains(&pu),
            "risk-neutral probability {pu} outside [0, 1] (try more steps)"
        );

        Ok(Self {
            x0: spot,
            end,
            dt,
            steps,
            up,
            down,
            pu,
            pd: 1.0 - pu,
            discount: (-risk_free_rate * dt).exp(),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Time to maturity covered by the tree.
    pub fn end(&self) -> Time {
        self.end
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Per-step discount factor `exp(−r Δt)`.
    pub fn discount(&self) -> DiscountFactor {
        self.discount
    }

    /// Number of nodes at time step `i` (always `i + 1`).
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Time at layer `i`.
    ///
    /// The last layer is exactly [`end`](Self::end), never `steps · Δt`, so
    /// maturity comparisons in payoff callbacks are exact.
    pub fn time(&self, i: Size) -> Time {
        if i == self.steps {
            self.end
        } else {
            i as Real * self.dt
        }
    }

    /// Index of the descendant node at step `i+1` for a given `branch`.
    ///
    /// `branch = 0` → down, `branch = 1` → up.
    pub fn descendant(&self, _i: Size, index: Size, branch: Size) -> Size {
        index + branch
    }

    /// Underlying value at node `(i, index)`: `S₀ · u^(2·index − i)`.
    pub fn underlying(&self, i: Size, index: Size) -> Real {
        let exponent = 2 * index as i32 - i as i32;
        self.x0 * self.up.powi(exponent)
    }

    /// Transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, _i: Size, _index: Size, branch: Size) -> Probability {
        if branch == 1 {
            self.pu
        } else {
            self.pd
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
