//! Data Definition Language (DDL) statements: CREATE, DROP
//!
//! These are parsed so callers get a precise rejection, but they have no
//! evaluation strategy.

/// CREATE TABLE column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// The declared type and constraints, as written.
    pub definition: String,
}

/// DDL statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlStatement {
    /// CREATE TABLE: creates a new table.
    CreateTable {
        /// The table name.
        name: String,
        /// Column specifications.
        columns: Vec<Column>,
        /// IF NOT EXISTS: if true, don't error if the table already exists.
        if_not_exists: bool,
    },
    /// DROP TABLE: drops one or more tables.
    DropTable {
        /// The tables to drop.
        names: Vec<String>,
        /// IF EXISTS: if true, don't error if the table doesn't exist.
        if_exists: bool,
    },
}
