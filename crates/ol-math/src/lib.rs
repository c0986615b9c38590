//! # ol-math
//!
//! Mathematical utilities: the standard normal distribution (via `statrs`)
//! and floating-point comparison helpers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::close;
pub use distributions::normal_cdf;
