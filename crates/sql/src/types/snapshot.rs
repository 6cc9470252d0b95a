//! Mocked table contents supplied for one evaluation session.

use super::row_set::RowSet;
use super::schema::Schema;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The currently known rows of each table, keyed by lower-cased table name.
///
/// Tables missing from the snapshot are treated as present but empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    tables: BTreeMap<String, RowSet>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contents of a table, replacing any previous contents.
    pub fn insert(&mut self, table: &str, rows: RowSet) {
        self.tables.insert(table.to_lowercase(), rows);
    }

    /// Sets the contents of a table, builder style.
    pub fn with_table(mut self, table: &str, rows: RowSet) -> Self {
        self.insert(table, rows);
        self
    }

    /// The contents of a table, ignoring case.
    pub fn get(&self, table: &str) -> Option<&RowSet> {
        self.tables.get(&table.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowSet)> {
        self.tables.iter().map(|(name, rows)| (name.as_str(), rows))
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Checks every table against the schema: the table must be declared,
    /// rows must match their descriptors, and every sourced column must be a
    /// declared column of that table.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        for (name, rows) in &self.tables {
            let Some(table) = schema.get_table(name) else {
                return Err(Error::SchemaMismatch(format!(
                    "snapshot table {} is not declared in the schema",
                    name
                )));
            };
            rows.validate()?;
            for column in rows.columns() {
                if let Some(source) = column.table_name()
                    && !source.eq_ignore_ascii_case(&table.name)
                {
                    return Err(Error::SchemaMismatch(format!(
                        "snapshot table {} carries a column of table {}",
                        name, source
                    )));
                }
                if let Some(column_name) = column.column_name()
                    && !table.has_column(column_name)
                {
                    return Err(Error::SchemaMismatch(format!(
                        "column {} is not declared in table {}",
                        column_name, table.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, RowSet)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, RowSet)>>(iter: T) -> Self {
        let mut snapshot = Snapshot::new();
        for (table, rows) in iter {
            snapshot.insert(&table, rows);
        }
        snapshot
    }
}
