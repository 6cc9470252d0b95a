//! Heuristic SQL evaluation for search-based test generation
//!
//! Given a schema and a snapshot of table contents, this crate evaluates SQL
//! statements the way a database would and scores how close their conditions
//! are to holding:
//! - Resolves tables, aliases and columns per statement scope
//! - Evaluates joins with NULL padding, derived tables and set operations
//! - Produces a graded truthness and the rows the statement would observe

mod config;
mod error;
mod execution;
mod heuristics;
mod parsing;
mod semantic;
mod types;

pub use config::{AmbiguityPolicy, HeuristicsConfig};
pub use error::{Error, Result};
pub use execution::StatementEvaluator;
pub use heuristics::{SqlDistanceWithMetrics, SqlHeuristicResult, SqlHeuristicsCalculator};
pub use parsing::{Parser, Statement, ast, parse_sql};
pub use semantic::{ColumnReference, Resolver, TableReference};
pub use types::{ColumnDescriptor, Row, RowSet, Schema, Snapshot, Table, Value};

pub use sqlfit_truthness::{Truthness, TruthnessCalculator, TruthnessConfig};
