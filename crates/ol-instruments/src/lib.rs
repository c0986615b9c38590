//! # ol-instruments
//!
//! Option contracts and their valuation entry points.
//!
//! Every contract implements [`Contract`]: an exercise value at any
//! `(spot, time)` the lattice visits, a closed-form value where one exists,
//! and a binomial-lattice value built on `ol-methods`. The concrete variants
//! (European, American, knock-out, compound, reloadable, extendible) are the
//! cases of [`ContractKind`] carried by [`OptionContract`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod exercise;
pub mod option;

pub use contract::{Contract, ContractTerms};
pub use exercise::ExerciseStyle;
pub use ol_core::{BarrierType, OptionType};
pub use option::{CompoundTerms, ContractKind, OptionContract, EXTENSION_STRIKE_STEP};
