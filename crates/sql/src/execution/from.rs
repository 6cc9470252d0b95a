//! FROM clause evaluation
//!
//! Each FROM item becomes a row set plus a reachability truthness. Items are
//! registered with the resolver as they are evaluated, so later join
//! predicates, WHERE clauses and projections can address them.

use super::StatementEvaluator;
use crate::error::Result;
use crate::parsing::ast::{Expression, FromClause, JoinType, SelectStatement};
use crate::types::{ColumnDescriptor, RowSet};
use sqlfit_truthness::{Truthness, TruthnessCalculator};

/// An evaluated FROM item.
pub(super) struct Source {
    pub rows: RowSet,
    pub truthness: Truthness,
    /// Whether the item's truthness folds into an enclosing join's. Joins
    /// and derived tables carry their own; a base table's is only its
    /// reachability.
    pub folds: bool,
}

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Evaluates a FROM clause. Comma-separated items are cross joined in
    /// declaration order.
    pub(super) fn evaluate_from(&mut self, items: &[FromClause]) -> Result<Source> {
        let mut source: Option<Source> = None;
        for item in items {
            let right = self.evaluate_from_item(item)?;
            source = Some(match source.take() {
                None => right,
                Some(left) => self.join_sources(left, right, JoinType::Cross, None)?,
            });
        }
        Ok(source.unwrap_or_else(|| Source {
            rows: RowSet::default(),
            truthness: Truthness::TRUE,
            folds: false,
        }))
    }

    fn evaluate_from_item(&mut self, item: &FromClause) -> Result<Source> {
        match item {
            FromClause::Table { name, alias } => self.evaluate_table(name, alias.as_deref()),
            FromClause::Subquery { query, alias } => self.evaluate_subquery(query, alias.as_deref()),
            FromClause::Join {
                left,
                right,
                r#type,
                predicate,
            } => {
                let left = self.evaluate_from_item(left)?;
                let right = self.evaluate_from_item(right)?;
                self.join_sources(left, right, *r#type, predicate.as_ref())
            }
        }
    }

    /// A base table: its snapshot rows, or none when the snapshot omits it.
    /// It is reachable once it has rows.
    fn evaluate_table(&mut self, name: &str, alias: Option<&str>) -> Result<Source> {
        self.resolver.register_table(name, alias)?;
        let table = self.resolver.schema().table(name)?;
        let rows = self.table_rows(table, alias)?;
        Ok(Source {
            truthness: self.calculator.reachability(!rows.is_empty()),
            rows,
            folds: false,
        })
    }

    /// A derived table: the subquery's output, evaluated in its own scope.
    /// Its columns lose their source table and are addressed by output name
    /// under the subquery's alias.
    fn evaluate_subquery(&mut self, query: &SelectStatement, alias: Option<&str>) -> Result<Source> {
        let result = self.evaluate_select(query)?;
        let columns: Vec<ColumnDescriptor> = result
            .rows
            .columns()
            .iter()
            .map(|c| {
                let name = c.output_name().or(c.column_name());
                ColumnDescriptor::new(name, name, None, alias)
            })
            .collect();
        self.resolver.register_derived(alias, &columns)?;
        Ok(Source {
            rows: result.rows.redescribe(columns)?,
            truthness: result.truthness,
            folds: true,
        })
    }

    /// Joins two evaluated items.
    ///
    /// Reachability depends on the join type. Inner and cross joins need
    /// output rows; when both sides have rows but no pair matches, the best
    /// pair's predicate score is lifted the same way WHERE lifts its best
    /// row. Outer joins only need rows on their driving side. Nested joins
    /// and derived tables fold their own truthness in.
    fn join_sources(
        &mut self,
        left: Source,
        right: Source,
        r#type: JoinType,
        predicate: Option<&Expression>,
    ) -> Result<Source> {
        let (left_rows, right_rows) = (left.rows.len(), right.rows.len());
        let nested: Vec<Truthness> = [&left, &right]
            .into_iter()
            .filter(|side| side.folds)
            .map(|side| side.truthness)
            .collect();
        let (rows, best) = self.join(left.rows, right.rows, r#type, predicate)?;
        let reachability = match r#type {
            JoinType::Cross | JoinType::Inner => match best {
                _ if !rows.is_empty() => Truthness::TRUE,
                Some(best) => self.calculator.scale_partial(best),
                None => self.calculator.partial(),
            },
            JoinType::Left => self.calculator.reachability(left_rows > 0),
            JoinType::Right => self.calculator.reachability(right_rows > 0),
            JoinType::Full => self.calculator.reachability(left_rows > 0 || right_rows > 0),
        };
        tracing::trace!(
            join = ?r#type,
            left_rows,
            right_rows,
            rows = rows.len(),
            "joined"
        );

        let truthness = nested
            .into_iter()
            .fold(reachability, |acc, t| self.calculator.and(t, acc));
        Ok(Source {
            rows,
            truthness,
            folds: true,
        })
    }
}
