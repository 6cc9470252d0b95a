//! Nested loop joins over materialized row sets

use super::StatementEvaluator;
use crate::error::Result;
use crate::parsing::ast::{Expression, JoinType};
use crate::types::{Row, RowSet, Value};
use sqlfit_truthness::{Truthness, TruthnessCalculator};
use std::iter::repeat_n;

/// NestedLoopJoiner pairs every left row with every right row and records
/// which pairs satisfy the join predicate. Outer joins then pad the rows of
/// their driving side that found no partner with NULLs.
struct NestedLoopJoiner {
    left: Vec<Vec<Value>>,
    right: Vec<Vec<Value>>,
    left_columns: usize,
    right_columns: usize,
    /// matches[l][r] is true if left row l and right row r satisfy the
    /// predicate.
    matches: Vec<Vec<bool>>,
}

impl NestedLoopJoiner {
    fn pair(&self, l: usize, r: usize) -> Vec<Value> {
        let mut row = self.left[l].clone();
        row.extend(self.right[r].iter().cloned());
        row
    }

    fn left_padded(&self, r: usize) -> Vec<Value> {
        let mut row: Vec<Value> = repeat_n(Value::Null, self.left_columns).collect();
        row.extend(self.right[r].iter().cloned());
        row
    }

    fn right_padded(&self, l: usize) -> Vec<Value> {
        let mut row = self.left[l].clone();
        row.extend(repeat_n(Value::Null, self.right_columns));
        row
    }

    /// Joined rows for the join type, left columns first.
    fn rows(&self, r#type: JoinType) -> Vec<Vec<Value>> {
        let mut rows = Vec::new();
        match r#type {
            JoinType::Cross | JoinType::Inner => {
                for l in 0..self.left.len() {
                    for r in 0..self.right.len() {
                        if self.matches[l][r] {
                            rows.push(self.pair(l, r));
                        }
                    }
                }
            }
            JoinType::Left | JoinType::Full => {
                for l in 0..self.left.len() {
                    let before = rows.len();
                    for r in 0..self.right.len() {
                        if self.matches[l][r] {
                            rows.push(self.pair(l, r));
                        }
                    }
                    if rows.len() == before {
                        rows.push(self.right_padded(l));
                    }
                }
                if r#type == JoinType::Full {
                    for r in 0..self.right.len() {
                        if !self.matches.iter().any(|m| m[r]) {
                            rows.push(self.left_padded(r));
                        }
                    }
                }
            }
            JoinType::Right => {
                for r in 0..self.right.len() {
                    let before = rows.len();
                    for l in 0..self.left.len() {
                        if self.matches[l][r] {
                            rows.push(self.pair(l, r));
                        }
                    }
                    if rows.len() == before {
                        rows.push(self.left_padded(r));
                    }
                }
            }
        }
        rows
    }
}

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Joins two row sets. Only pairs whose predicate certainly holds are
    /// kept; the predicate's graded score does not admit rows. Without a
    /// predicate every pair matches.
    ///
    /// Also returns the best predicate score over all pairs, or None when
    /// there is no predicate or no pair to score.
    pub(super) fn join(
        &mut self,
        left: RowSet,
        right: RowSet,
        r#type: JoinType,
        predicate: Option<&Expression>,
    ) -> Result<(RowSet, Option<Truthness>)> {
        let (left_descriptors, left) = left.into_parts();
        let (right_descriptors, right) = right.into_parts();
        let mut columns = left_descriptors;
        let left_columns = columns.len();
        let right_columns = right_descriptors.len();
        columns.extend(right_descriptors);

        let mut joiner = NestedLoopJoiner {
            matches: vec![vec![predicate.is_none(); right.len()]; left.len()],
            left,
            right,
            left_columns,
            right_columns,
        };
        let mut best: Option<Truthness> = None;
        if let Some(predicate) = predicate {
            for l in 0..joiner.left.len() {
                for r in 0..joiner.right.len() {
                    let values = joiner.pair(l, r);
                    let truthness = self.truthness(predicate, Row::new(&columns, &values))?;
                    self.evaluated_rows += 1;
                    joiner.matches[l][r] = truthness.is_true();
                    if best.is_none_or(|best| truthness.of_true() > best.of_true()) {
                        best = Some(truthness);
                    }
                }
            }
        }

        let mut rows = RowSet::new(columns);
        for row in joiner.rows(r#type) {
            rows.add_row(row)?;
        }
        Ok((rows, best))
    }
}
