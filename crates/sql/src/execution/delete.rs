//! DELETE evaluation

use super::StatementEvaluator;
use crate::error::Result;
use crate::heuristics::SqlHeuristicResult;
use crate::parsing::ast::Expression;
use sqlfit_truthness::{Truthness, TruthnessCalculator};

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Scores a DELETE. The deletion is not simulated: the observable rows
    /// are the target table as the snapshot has it.
    pub(super) fn evaluate_delete(
        &mut self,
        table: &str,
        r#where: Option<&Expression>,
    ) -> Result<SqlHeuristicResult> {
        self.scan_target(table, r#where)
    }

    /// Registers a mutation's target table and scores its WHERE clause over
    /// the table's rows. Without WHERE every row is targeted, which always
    /// holds.
    pub(super) fn scan_target(
        &mut self,
        table: &str,
        r#where: Option<&Expression>,
    ) -> Result<SqlHeuristicResult> {
        let mut scope = self.enter_scope();
        scope.resolver.register_table(table, None)?;
        let table = scope.resolver.schema().table(table)?;
        let truthness = match r#where {
            None => Truthness::TRUE,
            Some(predicate) => {
                let rows = scope.table_rows(table, None)?;
                scope.score_where(predicate, &rows)?.0
            }
        };
        Ok(SqlHeuristicResult {
            truthness,
            rows: scope.snapshot_rows(table),
        })
    }
}
