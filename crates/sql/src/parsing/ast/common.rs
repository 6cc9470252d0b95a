//! FROM clause structures

use super::dml::SelectStatement;
use super::expressions::Expression;

/// Join types for SQL joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Cross,
    Inner,
    Left,
    Right,
    Full,
}

/// A FROM item.
#[derive(Debug, Clone, PartialEq)]
pub enum FromClause {
    /// A table.
    Table {
        /// The table name.
        name: String,
        /// An optional alias for the table.
        alias: Option<String>,
    },
    /// A derived table: a parenthesized subquery.
    Subquery {
        /// The inner statement.
        query: Box<SelectStatement>,
        /// An optional alias for the derived table.
        alias: Option<String>,
    },
    /// A join of two or more tables (may be nested).
    Join {
        /// The left table to join.
        left: Box<FromClause>,
        /// The right table to join.
        right: Box<FromClause>,
        /// The join type.
        r#type: JoinType,
        /// The join condition. None for a cross join, or an outer join that
        /// pairs every row.
        predicate: Option<Expression>,
    },
}
