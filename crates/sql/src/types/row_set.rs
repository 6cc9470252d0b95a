//! Row sets: an ordered output schema of column descriptors plus rows.

use super::value::Value;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes one output column: where it came from and what it is called.
///
/// Equality is structural over all four fields. The source table name is
/// stored lower-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ColumnDescriptor {
    column_name: Option<String>,
    output_name: Option<String>,
    table_name: Option<String>,
    table_alias: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(
        column_name: Option<&str>,
        output_name: Option<&str>,
        table_name: Option<&str>,
        table_alias: Option<&str>,
    ) -> Self {
        Self {
            column_name: column_name.map(str::to_string),
            output_name: output_name.map(str::to_string),
            table_name: table_name.map(str::to_lowercase),
            table_alias: table_alias.map(str::to_string),
        }
    }

    /// A base table column, output under its own name.
    pub fn table_column(column: &str, table: &str) -> Self {
        Self::new(Some(column), Some(column), Some(table), None)
    }

    /// A computed column with no source column or table.
    pub fn computed(output_name: Option<&str>) -> Self {
        Self::new(None, output_name, None, None)
    }

    /// Same descriptor under a different output name.
    pub fn with_output_name(mut self, output_name: Option<&str>) -> Self {
        self.output_name = output_name.map(str::to_string);
        self
    }

    /// Same descriptor, qualified by a table alias.
    pub fn with_table_alias(mut self, table_alias: Option<&str>) -> Self {
        self.table_alias = table_alias.map(str::to_string);
        self
    }

    pub fn column_name(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn table_alias(&self) -> Option<&str> {
        self.table_alias.as_deref()
    }

    /// Whether the column is output under the given name, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.output_name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    /// Whether the column was sourced from the given column name.
    pub fn is_sourced_from(&self, column: &str) -> bool {
        self.column_name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(column))
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qualifier) = self.table_alias.as_ref().or(self.table_name.as_ref()) {
            write!(f, "{}.", qualifier)?;
        }
        write!(f, "{}", self.column_name.as_deref().unwrap_or("?"))?;
        if self.output_name != self.column_name
            && let Some(output) = &self.output_name
        {
            write!(f, " AS {}", output)?;
        }
        Ok(())
    }
}

/// A borrowed row: one value per descriptor of its row set, in order.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    columns: &'a [ColumnDescriptor],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn new(columns: &'a [ColumnDescriptor], values: &'a [Value]) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &'a [ColumnDescriptor] {
        self.columns
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// The value under the first column output with the given name.
    pub fn value_by_name(&self, name: &str) -> Option<&'a Value> {
        let index = self.columns.iter().position(|c| c.is_named(name))?;
        self.values.get(index)
    }

    /// The value of the first column matching the predicate.
    pub fn find_value(&self, predicate: impl Fn(&ColumnDescriptor) -> bool) -> Option<&'a Value> {
        let index = self.columns.iter().position(predicate)?;
        self.values.get(index)
    }
}

/// An ordered output schema plus an ordered sequence of rows.
///
/// Every row holds exactly one value per descriptor, in descriptor order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RowSet {
    table_name: Option<String>,
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Vec<Value>>,
}

impl RowSet {
    /// An empty row set over pre-built descriptors. The source table name is
    /// taken from the descriptors when they all agree on one.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        let table_name = match columns.split_first() {
            Some((first, rest)) if rest.iter().all(|c| c.table_name == first.table_name) => {
                first.table_name.clone()
            }
            _ => None,
        };
        Self {
            table_name,
            columns,
            rows: Vec::new(),
        }
    }

    /// An empty row set for a table: each column is output under its own
    /// name and sourced from the table.
    pub fn for_table<I, S>(table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            table_name: Some(table.to_lowercase()),
            columns: columns
                .into_iter()
                .map(|c| ColumnDescriptor::table_column(c.as_ref(), table))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// The lower-cased source table name, if the row set has one.
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Appends a row, matching values positionally to the descriptors.
    pub fn add_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::ColumnCountMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    /// Appends a row, builder style.
    pub fn with_row(mut self, values: Vec<Value>) -> Result<Self> {
        self.add_row(values)?;
        Ok(self)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|values| Row::new(&self.columns, values))
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row::new(&self.columns, values))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks the row arity invariant, e.g. after deserializing.
    pub fn validate(&self) -> Result<()> {
        for row in &self.rows {
            if row.len() != self.columns.len() {
                return Err(Error::ColumnCountMismatch {
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (Vec<ColumnDescriptor>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }

    /// Rebuilds the row set under new descriptors of the same arity.
    pub(crate) fn redescribe(self, columns: Vec<ColumnDescriptor>) -> Result<Self> {
        if columns.len() != self.columns.len() {
            return Err(Error::ColumnCountMismatch {
                expected: self.columns.len(),
                found: columns.len(),
            });
        }
        let mut row_set = Self::new(columns);
        row_set.rows = self.rows;
        Ok(row_set)
    }
}
