//! Graded truth values for search-based test generation.
//!
//! A [`Truthness`] says how close a predicate is to being satisfied (and to
//! being violated), instead of a plain boolean. The [`TruthnessCalculator`]
//! trait scores scalar comparisons and combines partial results; the default
//! [`DistanceCalculator`] implements the usual branch-distance heuristics.

pub mod calculator;
pub mod config;
pub mod distance;
pub mod error;
pub mod truthness;

pub use calculator::{Comparison, Scalar, TruthnessCalculator};
pub use config::TruthnessConfig;
pub use distance::DistanceCalculator;
pub use error::{Error, Result};
pub use truthness::Truthness;
