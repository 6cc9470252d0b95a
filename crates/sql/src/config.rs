//! Evaluation configuration

use serde::{Deserialize, Serialize};
use sqlfit_truthness::TruthnessConfig;

/// How an unqualified column exposed by several FROM items is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// The FROM item declared first wins.
    #[default]
    FirstDeclared,
    /// Ambiguous references fail with a resolution error.
    Reject,
}

/// Configuration for a heuristics calculator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Ambiguous unqualified column handling.
    pub ambiguity: AmbiguityPolicy,
    /// Scoring configuration for the default truthness calculator.
    pub truthness: TruthnessConfig,
}

impl HeuristicsConfig {
    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    pub fn with_truthness(mut self, truthness: TruthnessConfig) -> Self {
        self.truthness = truthness;
        self
    }
}
