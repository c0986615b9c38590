//! # optlattice
//!
//! Binomial-lattice and Black-Scholes valuation of vanilla and exotic equity
//! options.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ol-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use optlattice::instruments::{Contract, OptionContract};
//!
//! let put = OptionContract::american_put(63.75, 1.0, 0.2, 0.04).unwrap();
//! let european = OptionContract::european_put(63.75, 1.0, 0.2, 0.04).unwrap();
//! let american = put.lattice_value(75.0, 250, None).unwrap();
//! assert!(american >= european.analytic_value(75.0).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, settings, and error definitions.
pub use ol_core as core;

/// Mathematical utilities: normal distribution, float comparison.
pub use ol_math as math;

/// Numerical methods (binomial lattice).
pub use ol_methods as methods;

/// Closed-form pricing formulas.
pub use ol_pricingengines as pricingengines;

/// Option contracts.
pub use ol_instruments as instruments;

pub use ol_core::{Error, Result};
pub use ol_instruments::{Contract, OptionContract};
