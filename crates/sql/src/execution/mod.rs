//! Statement evaluation against a snapshot
//!
//! The evaluator walks a statement AST the way a query executor would, but
//! over small in-memory snapshots, and scores how close each predicate comes
//! to being satisfied alongside the rows it produces.

mod delete;
mod expression;
mod from;
mod join;
mod select;
mod set_operation;
mod update;

use crate::error::{Error, Result};
use crate::heuristics::SqlHeuristicResult;
use crate::parsing::ast::{DdlStatement, DmlStatement, Expression, Statement};
use crate::semantic::Resolver;
use crate::types::{ColumnDescriptor, RowSet, Snapshot, Table};
use sqlfit_truthness::{Truthness, TruthnessCalculator};
use std::ops::{Deref, DerefMut};

/// Evaluates one statement at a time against a read-only snapshot.
///
/// The evaluator owns the resolver's scope stack, so it must not be shared by
/// concurrent evaluations.
pub struct StatementEvaluator<'a, T: TruthnessCalculator> {
    snapshot: &'a Snapshot,
    calculator: &'a T,
    resolver: Resolver<'a>,
    /// Rows scored against a WHERE or join predicate so far.
    evaluated_rows: usize,
}

impl<'a, T: TruthnessCalculator> StatementEvaluator<'a, T> {
    pub fn new(snapshot: &'a Snapshot, calculator: &'a T, resolver: Resolver<'a>) -> Self {
        Self {
            snapshot,
            calculator,
            resolver,
            evaluated_rows: 0,
        }
    }

    pub fn evaluated_rows(&self) -> usize {
        self.evaluated_rows
    }

    /// Evaluates a statement into its truthness and observable rows.
    pub fn evaluate(&mut self, statement: &Statement) -> Result<SqlHeuristicResult> {
        let result = match statement {
            Statement::Dml(DmlStatement::Select(select)) => self.evaluate_select(select),
            Statement::Dml(DmlStatement::Delete { table, r#where }) => {
                self.evaluate_delete(table, r#where.as_ref())
            }
            Statement::Dml(DmlStatement::Update {
                table,
                set,
                r#where,
            }) => self.evaluate_update(table, set, r#where.as_ref()),
            Statement::Dml(DmlStatement::Insert { .. })
            | Statement::Ddl(DdlStatement::CreateTable { .. } | DdlStatement::DropTable { .. }) => {
                Err(Error::UnsupportedStatement(statement.kind().to_string()))
            }
        }?;
        tracing::debug!(
            statement = statement.kind(),
            truthness = %result.truthness,
            rows = result.rows.len(),
            "evaluated statement"
        );
        Ok(result)
    }

    /// Enters a new resolver scope, left again when the guard drops.
    fn enter_scope(&mut self) -> ScopedEvaluator<'_, 'a, T> {
        self.resolver.push_scope();
        ScopedEvaluator { evaluator: self }
    }

    /// A table's snapshot rows, or an empty row set over the schema columns
    /// when the snapshot omits the table.
    fn snapshot_rows(&self, table: &Table) -> RowSet {
        match self.snapshot.get(&table.name) {
            Some(rows) => rows.clone(),
            None => {
                tracing::debug!(table = %table.name, "table not in snapshot, treating as empty");
                RowSet::for_table(&table.name, &table.columns)
            }
        }
    }

    /// A table's rows as a FROM item sees them: sourced from the table under
    /// the given alias.
    fn table_rows(&self, table: &Table, alias: Option<&str>) -> Result<RowSet> {
        let rows = self.snapshot_rows(table);
        let columns = rows
            .columns()
            .iter()
            .map(|c| {
                ColumnDescriptor::new(c.column_name(), c.output_name(), Some(&table.name), alias)
            })
            .collect();
        rows.redescribe(columns)
    }

    /// Scores a WHERE predicate against every row, returning the statement's
    /// WHERE truthness and the indexes of the rows satisfying it.
    ///
    /// Without rows the predicate is only reachable. Otherwise the best row
    /// score is lifted above the partial credit floor.
    fn score_where(&mut self, predicate: &Expression, rows: &RowSet) -> Result<(Truthness, Vec<usize>)> {
        let mut best: Option<Truthness> = None;
        let mut selected = Vec::new();
        for (index, row) in rows.rows().enumerate() {
            let truthness = self.truthness(predicate, row)?;
            self.evaluated_rows += 1;
            if truthness.is_true() {
                selected.push(index);
            }
            if best.is_none_or(|best| truthness.of_true() > best.of_true()) {
                best = Some(truthness);
            }
        }
        let truthness = match best {
            Some(best) => self.calculator.scale_partial(best),
            None => self.calculator.partial(),
        };
        Ok((truthness, selected))
    }
}

/// An evaluator inside an entered scope. Dropping the guard leaves the
/// scope, including when evaluation fails part way.
pub(crate) struct ScopedEvaluator<'e, 'a, T: TruthnessCalculator> {
    evaluator: &'e mut StatementEvaluator<'a, T>,
}

impl<'a, T: TruthnessCalculator> Deref for ScopedEvaluator<'_, 'a, T> {
    type Target = StatementEvaluator<'a, T>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl<T: TruthnessCalculator> DerefMut for ScopedEvaluator<'_, '_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<T: TruthnessCalculator> Drop for ScopedEvaluator<'_, '_, T> {
    fn drop(&mut self) {
        self.evaluator.resolver.pop_scope();
    }
}
