//! Knock-out barrier direction.

use crate::Real;
use std::fmt;

/// Direction of a knock-out barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierType {
    /// Extinguished when the underlying is below the barrier.
    DownOut,
    /// Extinguished when the underlying is above the barrier.
    UpOut,
}

impl BarrierType {
    /// Infer the direction from the strike/barrier placement.
    ///
    /// A barrier below the strike knocks out on the way down; a barrier at
    /// or above the strike knocks out on the way up.
    pub fn from_strike(strike: Real, barrier: Real) -> Self {
        if strike > barrier {
            BarrierType::DownOut
        } else {
            BarrierType::UpOut
        }
    }

    /// Whether `spot` lies beyond `barrier`.
    #[inline]
    pub fn is_breached(self, spot: Real, barrier: Real) -> bool {
        match self {
            BarrierType::DownOut => spot < barrier,
            BarrierType::UpOut => spot > barrier,
        }
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarrierType::DownOut => write!(f, "DownOut"),
            BarrierType::UpOut => write!(f, "UpOut"),
        }
    }
}
