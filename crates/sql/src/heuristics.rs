//! Public entry points: scoring statements against a schema and snapshot

use crate::config::HeuristicsConfig;
use crate::error::Result;
use crate::execution::StatementEvaluator;
use crate::parsing::{Statement, parse_sql};
use crate::semantic::Resolver;
use crate::types::{RowSet, Schema, Snapshot};
use serde::{Deserialize, Serialize};
use sqlfit_truthness::{DistanceCalculator, Truthness, TruthnessCalculator};

/// The outcome of evaluating one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlHeuristicResult {
    /// How close the statement's conditions are to holding.
    pub truthness: Truthness,
    /// SELECT output, or the target table of UPDATE and DELETE.
    pub rows: RowSet,
}

/// A search fitness value for a statement. Lower is better; zero means the
/// statement's conditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqlDistanceWithMetrics {
    /// `1 - of_true` of the statement's truthness.
    pub distance: f64,
    /// Rows scored against a WHERE or join predicate.
    pub evaluated_rows: usize,
}

/// Scores SQL statements against a fixed schema and snapshot.
///
/// The calculator owns the partial credit constant, so independent
/// calculators may score with different constants side by side.
#[derive(Debug, Clone)]
pub struct SqlHeuristicsCalculator<T: TruthnessCalculator = DistanceCalculator> {
    schema: Schema,
    snapshot: Snapshot,
    calculator: T,
    config: HeuristicsConfig,
}

impl SqlHeuristicsCalculator<DistanceCalculator> {
    /// Creates a calculator with the default configuration.
    pub fn new(schema: Schema, snapshot: Snapshot) -> Result<Self> {
        Self::with_config(schema, snapshot, HeuristicsConfig::default())
    }

    /// Creates a calculator scoring with a branch distance calculator built
    /// from the configuration.
    pub fn with_config(schema: Schema, snapshot: Snapshot, config: HeuristicsConfig) -> Result<Self> {
        config.truthness.validate()?;
        let calculator = DistanceCalculator::new(config.truthness);
        Self::with_calculator(schema, snapshot, calculator, config)
    }
}

impl<T: TruthnessCalculator> SqlHeuristicsCalculator<T> {
    /// Creates a calculator with a custom truthness calculator. The schema
    /// and every snapshot table are validated up front.
    pub fn with_calculator(
        schema: Schema,
        snapshot: Snapshot,
        calculator: T,
        config: HeuristicsConfig,
    ) -> Result<Self> {
        schema.validate()?;
        snapshot.validate(&schema)?;
        Ok(Self {
            schema,
            snapshot,
            calculator,
            config,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &HeuristicsConfig {
        &self.config
    }

    /// Evaluates a statement into its truthness and rows.
    pub fn compute_heuristic(&self, statement: &Statement) -> Result<SqlHeuristicResult> {
        self.evaluator().evaluate(statement)
    }

    /// Parses and scores a statement. Statements without an evaluation
    /// strategy, such as INSERT, fail rather than score as false.
    pub fn compute_distance(&self, sql: &str) -> Result<SqlDistanceWithMetrics> {
        let statement = parse_sql(sql)?;
        let mut evaluator = self.evaluator();
        let result = evaluator.evaluate(&statement)?;
        Ok(SqlDistanceWithMetrics {
            distance: 1.0 - result.truthness.of_true(),
            evaluated_rows: evaluator.evaluated_rows(),
        })
    }

    fn evaluator(&self) -> StatementEvaluator<'_, T> {
        StatementEvaluator::new(
            &self.snapshot,
            &self.calculator,
            Resolver::new(&self.schema, self.config.ambiguity),
        )
    }
}
