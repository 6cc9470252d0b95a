//! Data Manipulation Language (DML) statements: SELECT, INSERT, UPDATE, DELETE

use super::common::FromClause;
use super::expressions::Expression;
use std::collections::BTreeMap;

/// Source of data for INSERT statements.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES: explicit values to insert.
    Values(Vec<Vec<Expression>>),
    /// SELECT: values from a SELECT query.
    Select(Box<SelectStatement>),
}

/// Set operators combining two SELECT branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// A set operation combining everything to its left with a right branch.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub op: SetOperator,
    /// ALL: keep duplicates. UNION concatenates either way.
    pub all: bool,
    /// The right-hand branch. Under UNION or EXCEPT it may carry its own
    /// INTERSECT chain, which binds tighter.
    pub right: Box<SelectStatement>,
}

/// SELECT statement structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// DISTINCT: drop duplicate output rows.
    pub distinct: bool,
    /// Expressions to select, with an optional column alias.
    pub select: Vec<(Expression, Option<String>)>,
    /// FROM: tables to select from. Comma-separated items are cross joined.
    pub from: Vec<FromClause>,
    /// WHERE: optional condition to filter rows.
    pub r#where: Option<Expression>,
    /// UNION, INTERSECT and EXCEPT with further branches, applied left to
    /// right.
    pub set_operations: Vec<SetOperation>,
}

/// DML statements
#[derive(Debug, Clone, PartialEq)]
pub enum DmlStatement {
    /// DELETE: deletes rows from a table.
    Delete {
        /// The table to delete from.
        table: String,
        /// WHERE: optional condition to match rows to delete.
        r#where: Option<Expression>,
    },
    /// INSERT INTO: inserts new rows into a table.
    Insert {
        /// Table to insert into.
        table: String,
        /// Columns to insert values into. If None, all columns are used.
        columns: Option<Vec<String>>,
        /// Source of data to insert.
        source: InsertSource,
    },
    /// UPDATE: updates rows in a table.
    Update {
        table: String,
        set: BTreeMap<String, Expression>, // column → value
        r#where: Option<Expression>,
    },
    /// SELECT: selects rows, possibly from a table.
    Select(Box<SelectStatement>),
}
