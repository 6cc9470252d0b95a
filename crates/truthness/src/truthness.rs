//! The graded truth value pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How true and how false a predicate is, each in `[0, 1]`.
///
/// `of_true == 1.0` means the predicate certainly holds, `of_false == 1.0`
/// means it certainly does not. Values in between carry the gradient the
/// search uses to move toward satisfaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Truthness {
    of_true: f64,
    of_false: f64,
}

impl Truthness {
    /// Certainly satisfied.
    pub const TRUE: Truthness = Truthness {
        of_true: 1.0,
        of_false: 0.0,
    };

    /// Certainly not satisfied.
    pub const FALSE: Truthness = Truthness {
        of_true: 0.0,
        of_false: 1.0,
    };

    /// Creates a truthness pair. Both components are clamped into `[0, 1]`.
    pub fn new(of_true: f64, of_false: f64) -> Self {
        Self {
            of_true: of_true.clamp(0.0, 1.0),
            of_false: of_false.clamp(0.0, 1.0),
        }
    }

    /// Builds the exact truthness of a boolean outcome.
    pub fn from_bool(value: bool) -> Self {
        if value { Self::TRUE } else { Self::FALSE }
    }

    pub fn of_true(&self) -> f64 {
        self.of_true
    }

    pub fn of_false(&self) -> f64 {
        self.of_false
    }

    pub fn is_true(&self) -> bool {
        self.of_true == 1.0
    }

    pub fn is_false(&self) -> bool {
        self.of_false == 1.0
    }

    /// Swaps the two components, i.e. the truthness of `NOT p`.
    pub fn invert(&self) -> Self {
        Self {
            of_true: self.of_false,
            of_false: self.of_true,
        }
    }
}

impl From<bool> for Truthness {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for Truthness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(of_true={}, of_false={})", self.of_true, self.of_false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(Truthness::TRUE.is_true());
        assert!(!Truthness::TRUE.is_false());
        assert!(Truthness::FALSE.is_false());
        assert!(!Truthness::FALSE.is_true());
    }

    #[test]
    fn test_invert() {
        let t = Truthness::new(0.3, 0.8);
        assert_eq!(t.invert(), Truthness::new(0.8, 0.3));
        assert_eq!(Truthness::TRUE.invert(), Truthness::FALSE);
    }

    #[test]
    fn test_new_clamps() {
        let t = Truthness::new(1.5, -0.2);
        assert_eq!(t.of_true(), 1.0);
        assert_eq!(t.of_false(), 0.0);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Truthness::new(0.1, 1.0)).unwrap();
        assert_eq!(json, r#"{"of_true":0.1,"of_false":1.0}"#);
    }
}
