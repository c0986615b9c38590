//! # ol-methods
//!
//! Numerical methods: the recombining binomial lattice and its
//! backward-induction pricer.
//!
//! # Modules
//!
//! * [`lattice`]: binomial tree and backward-induction pricing with early
//!   exercise

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial trees, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, roll_back, BinomialTree};
