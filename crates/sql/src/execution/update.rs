//! UPDATE evaluation

use super::StatementEvaluator;
use crate::error::{Error, Result};
use crate::heuristics::SqlHeuristicResult;
use crate::parsing::ast::Expression;
use sqlfit_truthness::TruthnessCalculator;
use std::collections::BTreeMap;

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Scores an UPDATE like a DELETE on the same table. Assigned columns
    /// must exist, but the assignments themselves are not evaluated.
    pub(super) fn evaluate_update(
        &mut self,
        table: &str,
        set: &BTreeMap<String, Expression>,
        r#where: Option<&Expression>,
    ) -> Result<SqlHeuristicResult> {
        let target = self.resolver.schema().table(table)?;
        if let Some(column) = set.keys().find(|c| !target.has_column(c)) {
            return Err(Error::ColumnNotFound(format!("{}.{}", target.name, column)));
        }
        self.scan_target(table, r#where)
    }
}
