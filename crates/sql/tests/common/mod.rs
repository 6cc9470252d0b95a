//! Common test utilities for SQL heuristic integration tests
#![allow(dead_code)]

use sqlfit_sql::ast::{DdlStatement, DmlStatement, Expression, InsertSource, Literal, Operator};
use sqlfit_sql::{
    Error, HeuristicsConfig, RowSet, Schema, Snapshot, SqlDistanceWithMetrics, SqlHeuristicResult,
    SqlHeuristicsCalculator, Statement, Table, Value, parse_sql,
};
use std::collections::BTreeMap;

/// Partial credit used by the default configuration.
pub const C: f64 = 0.1;

/// Test context holding a schema and snapshot, built up with CREATE TABLE and
/// INSERT statements, and scoring queries against them.
pub struct TestContext {
    pub schema: Schema,
    tables: BTreeMap<String, RowSet>,
    pub config: HeuristicsConfig,
}

impl TestContext {
    /// Create an empty test context
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
            tables: BTreeMap::new(),
            config: HeuristicsConfig::default(),
        }
    }

    /// Use a different configuration for subsequent queries
    pub fn with_config(mut self, config: HeuristicsConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply a CREATE TABLE or INSERT statement to the schema or snapshot
    pub fn exec(&mut self, sql: &str) {
        match parse_sql(sql).unwrap_or_else(|e| panic!("failed to parse {}: {}", sql, e)) {
            Statement::Ddl(DdlStatement::CreateTable { name, columns, .. }) => {
                let table = Table::new(name, columns.into_iter().map(|c| c.name));
                self.schema = std::mem::take(&mut self.schema).with_table(table);
            }
            Statement::Dml(DmlStatement::Insert {
                table,
                columns,
                source: InsertSource::Values(values),
            }) => {
                let declared = self
                    .schema
                    .table(&table)
                    .unwrap_or_else(|e| panic!("{}", e))
                    .clone();
                let rows = self
                    .tables
                    .entry(declared.name.to_lowercase())
                    .or_insert_with(|| RowSet::for_table(&declared.name, &declared.columns));
                for row in values {
                    let mut full = vec![Value::Null; declared.columns.len()];
                    for (i, expr) in row.iter().enumerate() {
                        let position = match &columns {
                            Some(columns) => declared
                                .columns
                                .iter()
                                .position(|c| c.eq_ignore_ascii_case(&columns[i]))
                                .unwrap_or_else(|| panic!("unknown column {}", columns[i])),
                            None => i,
                        };
                        full[position] = literal(expr);
                    }
                    rows.add_row(full).unwrap();
                }
            }
            other => panic!("unsupported setup statement: {:?}", other),
        }
    }

    /// Mark a declared table as present but empty in the snapshot
    pub fn empty(&mut self, table: &str) {
        let declared = self.schema.table(table).unwrap().clone();
        self.tables.insert(
            declared.name.to_lowercase(),
            RowSet::for_table(&declared.name, &declared.columns),
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tables
            .iter()
            .map(|(name, rows)| (name.clone(), rows.clone()))
            .collect()
    }

    pub fn calculator(&self) -> SqlHeuristicsCalculator {
        SqlHeuristicsCalculator::with_config(self.schema.clone(), self.snapshot(), self.config)
            .unwrap()
    }

    /// Evaluate a statement, panicking on error
    pub fn heuristic(&self, sql: &str) -> SqlHeuristicResult {
        let statement = parse_sql(sql).unwrap_or_else(|e| panic!("failed to parse {}: {}", sql, e));
        self.calculator()
            .compute_heuristic(&statement)
            .unwrap_or_else(|e| panic!("failed to evaluate {}: {}", sql, e))
    }

    /// Compute the distance of a statement, panicking on error
    pub fn distance(&self, sql: &str) -> SqlDistanceWithMetrics {
        self.calculator()
            .compute_distance(sql)
            .unwrap_or_else(|e| panic!("failed to evaluate {}: {}", sql, e))
    }

    /// Evaluate a statement that is expected to fail
    pub fn error(&self, sql: &str) -> Error {
        match self.calculator().compute_distance(sql) {
            Ok(result) => panic!("expected {} to fail, got {:?}", sql, result),
            Err(e) => e,
        }
    }

    /// Output values of a statement, row by row
    pub fn rows(&self, sql: &str) -> Vec<Vec<Value>> {
        self.heuristic(sql)
            .rows
            .rows()
            .map(|row| row.values().to_vec())
            .collect()
    }

    /// Assert the number of rows a statement outputs
    pub fn assert_row_count(&self, sql: &str, expected: usize) {
        let actual = self.heuristic(sql).rows.len();
        assert_eq!(
            actual, expected,
            "Expected {} rows from '{}', got {}",
            expected, sql, actual
        );
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn literal(expr: &Expression) -> Value {
    match expr {
        Expression::Literal(Literal::Null) => Value::Null,
        Expression::Literal(Literal::Boolean(b)) => Value::Bool(*b),
        Expression::Literal(Literal::Integer(i)) => Value::I64(*i),
        Expression::Literal(Literal::Float(f)) => Value::F64(*f),
        Expression::Literal(Literal::String(s)) => Value::Str(s.clone()),
        Expression::Operator(Operator::Negate(expr)) => match literal(expr) {
            Value::I64(i) => Value::I64(-i),
            Value::F64(f) => Value::F64(-f),
            other => panic!("can't negate {}", other),
        },
        other => panic!("not a literal: {}", other),
    }
}

/// Setup a context with the standard schema: employees, departments and
/// projects, two single-column tables, people and a category tree. No table
/// has rows yet.
pub fn setup_test() -> TestContext {
    let mut ctx = TestContext::new();
    ctx.exec(
        "CREATE TABLE Employees (name TEXT, first_name TEXT, department_id INTEGER, \
         project_id INTEGER, salary INTEGER)",
    );
    ctx.exec("CREATE TABLE Departments (department_id INTEGER, department_name TEXT)");
    ctx.exec("CREATE TABLE Projects (project_id INTEGER, project_name TEXT)");
    ctx.exec("CREATE TABLE TableA (name TEXT)");
    ctx.exec("CREATE TABLE TableB (name TEXT)");
    ctx.exec("CREATE TABLE Person (name TEXT, age INTEGER, salary INTEGER)");
    ctx.exec("CREATE TABLE Categories (id INTEGER, name TEXT, parent_id INTEGER)");
    ctx
}

/// Assert two truthness components are equal up to rounding
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[macro_export]
macro_rules! assert_rows {
    ($ctx:expr, $sql:expr, [$([$($value:expr),* $(,)?]),* $(,)?]) => {
        let expected: Vec<Vec<sqlfit_sql::Value>> =
            vec![$(vec![$(sqlfit_sql::Value::from($value)),*]),*];
        assert_eq!($ctx.rows($sql), expected, "Query '{}' rows don't match", $sql);
    };
    ($ctx:expr, $sql:expr, $count:expr) => {
        $ctx.assert_row_count($sql, $count);
    };
}

#[macro_export]
macro_rules! assert_error {
    ($ctx:expr, $sql:expr, $pattern:pat) => {
        let err = $ctx.error($sql);
        assert!(
            matches!(err, $pattern),
            "unexpected error for '{}': {:?}",
            $sql,
            err
        );
    };
}
