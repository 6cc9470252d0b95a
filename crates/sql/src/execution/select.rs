//! SELECT evaluation: FROM, WHERE scoring and projection

use super::StatementEvaluator;
use crate::error::{Error, Result};
use crate::heuristics::SqlHeuristicResult;
use crate::parsing::ast::{Expression, SelectStatement};
use crate::types::{ColumnDescriptor, RowSet, Value};
use sqlfit_truthness::{Truthness, TruthnessCalculator};
use std::collections::HashSet;

/// Where a projected value comes from.
enum Projection<'e> {
    /// A column of the FROM row set, copied as is.
    Source(usize),
    /// An expression evaluated per row.
    Computed(&'e Expression),
}

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Evaluates a SELECT and any set operations chained after it, folding
    /// the chain from the left.
    pub(super) fn evaluate_select(&mut self, select: &SelectStatement) -> Result<SqlHeuristicResult> {
        let mut result = self.evaluate_select_core(select)?;
        for operation in &select.set_operations {
            let right = self.evaluate_select(&operation.right)?;
            result = self.combine(result, operation, right)?;
        }
        Ok(result)
    }

    /// Evaluates a single SELECT in its own scope.
    ///
    /// Without FROM there is a single empty row, so computed projections
    /// still produce output. Without WHERE the truthness is that of the FROM
    /// clause, otherwise it is conjoined with the WHERE truthness.
    fn evaluate_select_core(&mut self, select: &SelectStatement) -> Result<SqlHeuristicResult> {
        let mut scope = self.enter_scope();
        scope.resolver.register_select_aliases(&select.select)?;

        let (source, from_truthness) = if select.from.is_empty() {
            (RowSet::default().with_row(Vec::new())?, Truthness::TRUE)
        } else {
            let source = scope.evaluate_from(&select.from)?;
            (source.rows, source.truthness)
        };

        let (truthness, selected) = match &select.r#where {
            None => (from_truthness, (0..source.len()).collect()),
            Some(predicate) => {
                let (where_truthness, selected) = scope.score_where(predicate, &source)?;
                (
                    scope.calculator.and(from_truthness, where_truthness),
                    selected,
                )
            }
        };

        let rows = scope.project(&select.select, &source, &selected, select.distinct)?;
        Ok(SqlHeuristicResult { truthness, rows })
    }

    /// Projects the selected source rows through the select list.
    fn project(
        &self,
        items: &[(Expression, Option<String>)],
        source: &RowSet,
        selected: &[usize],
        distinct: bool,
    ) -> Result<RowSet> {
        let mut columns = Vec::new();
        let mut projections = Vec::new();
        for (expr, alias) in items {
            match expr {
                Expression::All => {
                    for (index, column) in source.columns().iter().enumerate() {
                        columns.push(column.clone());
                        projections.push(Projection::Source(index));
                    }
                }
                Expression::QualifiedAll(qualifier) => {
                    let reference = self.resolver.resolve_table(qualifier)?;
                    for (index, column) in source.columns().iter().enumerate() {
                        if reference.owns(column) {
                            columns.push(column.clone());
                            projections.push(Projection::Source(index));
                        }
                    }
                }
                Expression::Column(table, column) => {
                    match self.resolver.resolve(table.as_deref(), column) {
                        Ok(reference) => {
                            projections.push(Projection::Source(reference.position(source.columns())?));
                            columns.push(reference.descriptor(alias.as_deref()));
                        }
                        Err(Error::ColumnNotFound(_))
                            if table.is_none() && self.resolver.select_alias(column).is_some() =>
                        {
                            projections.push(Projection::Computed(expr));
                            columns.push(ColumnDescriptor::computed(Some(
                                alias.as_deref().unwrap_or(column),
                            )));
                        }
                        Err(err) => return Err(err),
                    }
                }
                expr => {
                    projections.push(Projection::Computed(expr));
                    columns.push(ColumnDescriptor::computed(alias.as_deref()));
                }
            }
        }

        let mut rows = RowSet::new(columns);
        let mut seen = HashSet::new();
        for row in selected.iter().filter_map(|&index| source.row(index)) {
            let mut values = Vec::with_capacity(projections.len());
            for projection in &projections {
                values.push(match projection {
                    Projection::Source(index) => row.value(*index).cloned().unwrap_or(Value::Null),
                    Projection::Computed(expr) => self.value(expr, row)?,
                });
            }
            if distinct && !seen.insert(values.clone()) {
                continue;
            }
            rows.add_row(values)?;
        }
        Ok(rows)
    }
}
