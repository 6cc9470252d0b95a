//! Truthness scoring configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Partial credit given to conditions that are reachable but not yet
/// satisfied, e.g. a join whose driving side is still empty.
pub const DEFAULT_PARTIAL_CREDIT: f64 = 0.1;

/// Configuration owned by a truthness calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruthnessConfig {
    /// The partial credit constant `C`, strictly between 0 and 1.
    pub partial_credit: f64,
}

impl Default for TruthnessConfig {
    fn default() -> Self {
        Self {
            partial_credit: DEFAULT_PARTIAL_CREDIT,
        }
    }
}

impl TruthnessConfig {
    /// Creates a config with the given partial credit.
    pub fn with_partial_credit(partial_credit: f64) -> Result<Self> {
        let config = Self { partial_credit };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the partial credit is usable as a gradient floor.
    pub fn validate(&self) -> Result<()> {
        if self.partial_credit > 0.0 && self.partial_credit < 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidPartialCredit(self.partial_credit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TruthnessConfig::default();
        assert_eq!(config.partial_credit, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        for credit in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert!(matches!(
                TruthnessConfig::with_partial_credit(credit),
                Err(Error::InvalidPartialCredit(_))
            ));
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: TruthnessConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TruthnessConfig::default());

        let config: TruthnessConfig = serde_json::from_str(r#"{"partial_credit":0.25}"#).unwrap();
        assert_eq!(config.partial_credit, 0.25);
    }
}
