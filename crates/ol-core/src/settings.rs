//! Pricing settings.
//!
//! [`PricingSettings`] holds the step counts used when a contract is valued
//! without an explicit step count, the fixed step counts of nested
//! valuations, and the upper guard on lattice size. It is a plain `Copy`
//! value carried by each contract; there is no process-wide mutable state, so
//! two contracts priced on different threads never observe each other's
//! settings.

use crate::errors::Result;
use crate::{ensure, Size};

/// Step count used by `value(spot)` for lattice-valued contracts.
pub const DEFAULT_STEPS: Size = 250;

/// Step count of the nested lattice inside a compound call's payoff.
pub const DEFAULT_COMPOUND_STEPS: Size = 30;

/// Step count of the nested lattice inside a reloadable call's payoff.
pub const DEFAULT_RELOAD_STEPS: Size = 100;

/// Largest step count accepted by the lattice.
pub const DEFAULT_MAX_STEPS: Size = 20_000;

/// Step counts and guards applied when pricing a contract.
///
/// # Example
/// ```
/// use ol_core::PricingSettings;
/// let settings = PricingSettings::default().with_default_steps(500).unwrap();
/// assert_eq!(settings.default_steps(), 500);
/// assert_eq!(settings.reload_steps(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingSettings {
    default_steps: Size,
    compound_steps: Size,
    reload_steps: Size,
    max_steps: Size,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            default_steps: DEFAULT_STEPS,
            compound_steps: DEFAULT_COMPOUND_STEPS,
            reload_steps: DEFAULT_RELOAD_STEPS,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl PricingSettings {
    /// Step count used when no explicit count is requested.
    pub fn default_steps(&self) -> Size {
        self.default_steps
    }

    /// Step count of the nested compound-call lattice.
    pub fn compound_steps(&self) -> Size {
        self.compound_steps
    }

    /// Step count of the nested reloadable-call lattice.
    pub fn reload_steps(&self) -> Size {
        self.reload_steps
    }

    /// Upper bound on any lattice step count.
    pub fn max_steps(&self) -> Size {
        self.max_steps
    }

    /// Replace the default step count.
    pub fn with_default_steps(mut self, steps: Size) -> Result<Self> {
        self.default_steps = self.checked(steps, "default")?;
        Ok(self)
    }

    /// Replace the nested compound-call step count.
    pub fn with_compound_steps(mut self, steps: Size) -> Result<Self> {
        self.compound_steps = self.checked(steps, "compound")?;
        Ok(self)
    }

    /// Replace the nested reloadable-call step count.
    pub fn with_reload_steps(mut self, steps: Size) -> Result<Self> {
        self.reload_steps = self.checked(steps, "reload")?;
        Ok(self)
    }

    /// Replace the step-count guard.
    ///
    /// The guard must not be smaller than any configured step count.
    pub fn with_max_steps(mut self, max_steps: Size) -> Result<Self> {
        let largest = self
            .default_steps
            .max(self.compound_steps)
            .max(self.reload_steps);
        ensure!(
            max_steps >= largest,
            "max_steps ({max_steps}) is below a configured step count ({largest})"
        );
        self.max_steps = max_steps;
        Ok(self)
    }

    fn checked(&self, steps: Size, what: &str) -> Result<Size> {
        ensure!(steps > 0, "{what} step count must be positive");
        ensure!(
            steps <= self.max_steps,
            "{what} step count {steps} exceeds max_steps {}",
            self.max_steps
        );
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = PricingSettings::default();
        assert_eq!(s.default_steps(), 250);
        assert_eq!(s.compound_steps(), 30);
        assert_eq!(s.reload_steps(), 100);
        assert_eq!(s.max_steps(), 20_000);
    }

    #[test]
    fn builders_validate() {
        let s = PricingSettings::default();
        assert!(s.with_default_steps(0).unwrap_err().is_invalid_argument());
        assert!(s.with_reload_steps(30_000).is_err());
        assert!(s.with_max_steps(100).is_err());

        let s = s
            .with_compound_steps(10)
            .and_then(|s| s.with_max_steps(1_000))
            .unwrap();
        assert_eq!(s.compound_steps(), 10);
        assert_eq!(s.max_steps(), 1_000);
    }
}
