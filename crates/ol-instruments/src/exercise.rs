//! Option exercise styles.
//!
//! An [`ExerciseStyle`] defines *when* a contract's right can be exercised.
//! The lattice asks every contract for its exercise value at every node; a
//! European-style contract answers zero before maturity.

use std::fmt;

/// Type of exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseStyle {
    /// Can only be exercised at expiry.
    European,
    /// Can be exercised at any time up to expiry.
    American,
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(ExerciseStyle::European.to_string(), "European");
        assert_eq!(ExerciseStyle::American.to_string(), "American");
    }
}
