//! Error types for optlattice.
//!
//! All fallible operations return [`Result`]. Bad inputs surface as
//! [`Error::InvalidArgument`] before any computation starts; closed-form
//! valuation of a contract without a closed form surfaces as
//! [`Error::UnsupportedOperation`]. Neither is ever replaced by a sentinel
//! value.

use thiserror::Error;

/// The top-level error type used throughout optlattice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An input is outside the domain of the requested operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not available for this kind of contract.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A computation failed after its inputs were accepted.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// `true` for [`Error::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// `true` for [`Error::UnsupportedOperation`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::UnsupportedOperation(_))
    }
}

/// Shorthand `Result` type used throughout optlattice.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate a caller-supplied argument.
///
/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ol_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ol_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Reject an operation the receiver does not support.
///
/// Returns `Err(Error::UnsupportedOperation(...))` immediately.
///
/// # Example
/// ```
/// use ol_core::{unsupported, errors::Error};
/// fn closed_form() -> ol_core::errors::Result<f64> {
///     unsupported!("no closed form for {}", "compound calls");
/// }
/// assert!(matches!(closed_form(), Err(Error::UnsupportedOperation(_))));
/// ```
#[macro_export]
macro_rules! unsupported {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::UnsupportedOperation(format!($($msg)*)))
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ol_core::{fail, errors::Error};
/// fn always_err() -> ol_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
