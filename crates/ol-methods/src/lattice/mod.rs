//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`BinomialTree`]: recombining Cox-Ross-Rubinstein tree
//! * [`roll_back`]: backward induction against a time-dependent exercise
//!   value, with an early-exercise check at every node
//! * [`price_european`] / [`price_american`]: convenience wrappers for
//!   payoffs that depend on the underlying only

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use ol_core::errors::Result;
use ol_core::{Real, Time};
use tracing::debug;

// ─── Backward induction ───────────────────────────────────────────────────────

/// Value a claim by backward induction on a binomial tree.
///
/// `exercise(spot, t)` returns the payoff of exercising at time `t` with the
/// underlying at `spot`. It is called with `t == tree.end()` on the terminal
/// layer and with `t = j·Δt` on layer `j < N`. A claim that cannot be
/// exercised early returns `0` off maturity, which leaves the continuation
/// value in place.
///
/// One buffer of `N + 1` values is allocated and overwritten layer by layer;
/// at layer `j` only the first `j + 1` entries are live.
///
/// # Errors
/// Propagates the first error returned by `exercise`.
pub fn roll_back<F>(tree: &BinomialTree, mut exercise: F) -> Result<Real>
where
    F: FnMut(Real, Time) -> Result<Real>,
{
    let n = tree.steps();
    let discount = tree.discount();
    let pu = tree.probability(0, 0, 1);
    let pd = tree.probability(0, 0, 0);

    debug!(
        steps = n,
        dt = tree.dt(),
        up = tree.up(),
        pu,
        "rolling back binomial lattice"
    );

    // Terminal values at maturity
    let maturity = tree.time(n);
    let mut values = Vec::with_capacity(tree.size(n));
    for j in 0..tree.size(n) {
        values.push(exercise(tree.underlying(n, j), maturity)?);
    }

    // Roll back through the tree
    for i in (0..n).rev() {
        let t = tree.time(i);
        for j in 0..tree.size(i) {
            let d_up = tree.descendant(i, j, 1);
            let d_down = tree.descendant(i, j, 0);
            let hold = discount * (pu * values[d_up] + pd * values[d_down]);
            let early = exercise(tree.underlying(i, j), t)?;
            values[j] = hold.max(early);
        }
    }

    Ok(values[0])
}

/// Price a European claim with terminal payoff `payoff(S_T)`.
///
/// # Errors
/// See [`roll_back`].
pub fn price_european(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real) -> Result<Real> {
    let end = tree.end();
    roll_back(tree, |s, t| Ok(if t == end { payoff(s) } else { 0.0 }))
}

/// Price an American claim that pays `payoff(S)` whenever exercised.
///
/// # Errors
/// See [`roll_back`].
pub fn price_american(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real) -> Result<Real> {
    roll_back(tree, |s, _| Ok(payoff(s)))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
