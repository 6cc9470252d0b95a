//! Set operations combining the outputs of two SELECTs

use super::StatementEvaluator;
use crate::error::{Error, Result};
use crate::heuristics::SqlHeuristicResult;
use crate::parsing::ast::{SetOperation, SetOperator};
use crate::types::{ColumnDescriptor, RowSet, Value};
use sqlfit_truthness::TruthnessCalculator;
use std::collections::HashSet;

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Combines two branch results. Both branches need the same number of
    /// columns.
    ///
    /// UNION concatenates rows in branch order and holds if either branch
    /// does. INTERSECT and EXCEPT compare value tuples and hold when they
    /// produce rows.
    pub(super) fn combine(
        &self,
        left: SqlHeuristicResult,
        operation: &SetOperation,
        right: SqlHeuristicResult,
    ) -> Result<SqlHeuristicResult> {
        if left.rows.columns().len() != right.rows.columns().len() {
            return Err(Error::ColumnCountMismatch {
                expected: left.rows.columns().len(),
                found: right.rows.columns().len(),
            });
        }
        let columns = combined_columns(left.rows.columns(), right.rows.columns());
        let (_, left_rows) = left.rows.into_parts();
        let (_, right_rows) = right.rows.into_parts();

        let rows = match operation.op {
            SetOperator::Union => left_rows.into_iter().chain(right_rows).collect(),
            SetOperator::Intersect | SetOperator::Except => {
                let keep = operation.op == SetOperator::Intersect;
                let right: HashSet<Vec<Value>> = right_rows.into_iter().collect();
                let mut seen = HashSet::new();
                left_rows
                    .into_iter()
                    .filter(|row| right.contains(row) == keep)
                    .filter(|row| operation.all || seen.insert(row.clone()))
                    .collect::<Vec<_>>()
            }
        };

        let mut combined = RowSet::new(columns);
        for row in rows {
            combined.add_row(row)?;
        }
        let truthness = match operation.op {
            SetOperator::Union => self.calculator.or(left.truthness, right.truthness),
            SetOperator::Intersect | SetOperator::Except => {
                self.calculator.reachability(!combined.is_empty())
            }
        };
        Ok(SqlHeuristicResult {
            truthness,
            rows: combined,
        })
    }
}

/// Output descriptors of a set operation: names come from the left branch,
/// and the source affiliation survives only where both branches agree.
fn combined_columns(left: &[ColumnDescriptor], right: &[ColumnDescriptor]) -> Vec<ColumnDescriptor> {
    left.iter()
        .zip(right)
        .map(|(l, r)| {
            let agree = l.table_name() == r.table_name() && l.table_alias() == r.table_alias();
            let (table, alias) = match agree {
                true => (l.table_name(), l.table_alias()),
                false => (None, None),
            };
            ColumnDescriptor::new(l.column_name(), l.output_name(), table, alias)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_columns_clear_disagreeing_tables() {
        let left = [
            ColumnDescriptor::table_column("name", "Employees"),
            ColumnDescriptor::table_column("id", "Employees"),
        ];
        let right = [
            ColumnDescriptor::table_column("department_name", "Departments"),
            ColumnDescriptor::table_column("id", "employees"),
        ];
        assert_eq!(
            combined_columns(&left, &right),
            vec![
                ColumnDescriptor::new(Some("name"), Some("name"), None, None),
                ColumnDescriptor::table_column("id", "Employees"),
            ]
        );
    }
}
