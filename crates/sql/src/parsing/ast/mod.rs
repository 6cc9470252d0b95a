//! Abstract Syntax Tree (AST) for SQL statements

pub mod common;
pub mod ddl;
pub mod dml;
pub mod expressions;

pub use common::{FromClause, JoinType};
pub use ddl::{Column, DdlStatement};
pub use dml::{DmlStatement, InsertSource, SelectStatement, SetOperation, SetOperator};
pub use expressions::{Expression, Literal, Operator};

/// SQL statements represented as an Abstract Syntax Tree (AST).
/// The statement is the root node of this tree, describing the syntactic
/// structure of a SQL statement. Built from raw SQL by the parser, or by hand
/// through the constructors below, and handed to the statement evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// DDL statements (CREATE, DROP)
    Ddl(DdlStatement),

    /// DML statements (SELECT, INSERT, UPDATE, DELETE)
    Dml(DmlStatement),
}

impl Statement {
    /// Creates a Delete statement
    pub fn delete(table: String, r#where: Option<Expression>) -> Self {
        Statement::Dml(DmlStatement::Delete { table, r#where })
    }

    /// Creates an Insert statement
    pub fn insert(table: String, columns: Option<Vec<String>>, source: InsertSource) -> Self {
        Statement::Dml(DmlStatement::Insert {
            table,
            columns,
            source,
        })
    }

    /// Creates an Update statement
    pub fn update(
        table: String,
        set: std::collections::BTreeMap<String, Expression>,
        r#where: Option<Expression>,
    ) -> Self {
        Statement::Dml(DmlStatement::Update {
            table,
            set,
            r#where,
        })
    }

    /// Creates a Select statement
    pub fn select(select_stmt: SelectStatement) -> Self {
        Statement::Dml(DmlStatement::Select(Box::new(select_stmt)))
    }

    /// A short name for the statement kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Ddl(DdlStatement::CreateTable { .. }) => "CREATE TABLE",
            Statement::Ddl(DdlStatement::DropTable { .. }) => "DROP TABLE",
            Statement::Dml(DmlStatement::Delete { .. }) => "DELETE",
            Statement::Dml(DmlStatement::Insert { .. }) => "INSERT",
            Statement::Dml(DmlStatement::Update { .. }) => "UPDATE",
            Statement::Dml(DmlStatement::Select(_)) => "SELECT",
        }
    }
}
