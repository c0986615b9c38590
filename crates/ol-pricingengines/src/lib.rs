//! # ol-pricingengines
//!
//! Closed-form pricing formulas.
//!
//! ## Formulas
//!
//! - [`black_scholes_merton`]: Black-Scholes-Merton value of a European call or put
//! - [`black_scholes`]: the same without dividends
//! - [`cash_or_nothing`]: European cash-or-nothing digital
//! - [`knock_out_at_expiry`]: knock-out whose barrier is checked at expiry only

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_barrier_engine;
pub mod analytic_european_engine;

pub use analytic_barrier_engine::knock_out_at_expiry;
pub use analytic_european_engine::{black_scholes, black_scholes_merton, cash_or_nothing};
