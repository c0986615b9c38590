//! # ol-core
//!
//! Core types, settings, and error definitions for optlattice.
//!
//! This crate provides the building blocks shared across every other crate in
//! the workspace: primitive type aliases, the error hierarchy with its
//! early-return macros, the call/put [`OptionType`], the knock-out
//! [`BarrierType`], and the [`PricingSettings`] value that carries step
//! counts and guards.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Knock-out barrier direction.
pub mod barrier_type;

/// Error types and the `ensure!` / `fail!` / `unsupported!` macros.
pub mod errors;

/// Call / put option type.
pub mod option_type;

/// Pricing settings (step counts, guards).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Signed integer used where callers may pass out-of-range counts.
pub type Integer = i32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A probability in [0, 1].
pub type Probability = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use barrier_type::BarrierType;
pub use errors::{Error, Result};
pub use option_type::OptionType;
pub use settings::PricingSettings;
