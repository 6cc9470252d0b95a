//! Schema descriptors: table names and their ordered column names
//!
//! Names are matched case-insensitively everywhere, but keep the spelling
//! they were declared with.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A table: a name and an ordered list of column names.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Table {
    /// The table name. Can't be empty.
    pub name: String,
    /// The column names, in declaration order.
    pub columns: Vec<String>,
}

impl Table {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the declared spelling of a column, if the table has it.
    pub fn get_column(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// Checks name and column uniqueness.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidValue("Table name cannot be empty".into()));
        }
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.eq_ignore_ascii_case(column)) {
                return Err(Error::InvalidValue(format!(
                    "Duplicate column {} in table {}",
                    column, self.name
                )));
            }
        }
        Ok(())
    }
}

/// An immutable set of tables, supplied once per evaluation session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, builder style.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Looks up a table by name, ignoring case.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Looks up a table by name, erroring if it doesn't exist.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.get_table(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Checks that every table is valid and table names are unique.
    pub fn validate(&self) -> Result<()> {
        for (i, table) in self.tables.iter().enumerate() {
            table.validate()?;
            if self.tables[..i]
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(&table.name))
            {
                return Err(Error::DuplicateTable(table.name.clone()));
            }
        }
        Ok(())
    }
}
