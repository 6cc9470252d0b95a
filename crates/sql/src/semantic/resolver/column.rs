//! Resolved column references

use super::TableReference;
use crate::error::{Error, Result};
use crate::types::{ColumnDescriptor, Row, Value};

/// A column mention matched to the FROM item exposing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
    pub table: TableReference,
    /// The column name as the FROM item spells it.
    pub column: String,
}

impl ColumnReference {
    /// Whether the descriptor describes this column.
    pub fn matches(&self, descriptor: &ColumnDescriptor) -> bool {
        self.table.owns(descriptor) && descriptor.is_sourced_from(&self.column)
    }

    /// Position of the column among a FROM row set's descriptors.
    pub fn position(&self, columns: &[ColumnDescriptor]) -> Result<usize> {
        columns
            .iter()
            .position(|c| self.matches(c))
            .ok_or_else(|| self.missing())
    }

    /// The column's value in a row of a FROM row set.
    pub fn value<'r>(&self, row: &Row<'r>) -> Result<&'r Value> {
        row.find_value(|c| self.matches(c))
            .ok_or_else(|| self.missing())
    }

    /// The descriptor a projection of this column gets: sourced from the
    /// table (none for derived tables), output under the alias if given.
    pub fn descriptor(&self, alias: Option<&str>) -> ColumnDescriptor {
        ColumnDescriptor::new(
            Some(&self.column),
            Some(alias.unwrap_or(&self.column)),
            self.table.table_name(),
            None,
        )
    }

    fn missing(&self) -> Error {
        Error::SchemaMismatch(format!(
            "rows of {} carry no column {}",
            self.table, self.column
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowSet;

    #[test]
    fn test_value_lookup_and_projection_descriptor() {
        let rows = RowSet::for_table("Person", ["name", "age"])
            .with_row(vec!["John".into(), 30.into()])
            .unwrap();
        let reference = ColumnReference {
            table: TableReference::Table {
                name: "Person".into(),
                alias: None,
            },
            column: "age".into(),
        };
        let row = rows.row(0).unwrap();
        assert_eq!(reference.value(&row).unwrap(), &Value::I64(30));
        assert_eq!(reference.position(rows.columns()).unwrap(), 1);
        assert_eq!(
            reference.descriptor(Some("years")),
            ColumnDescriptor::new(Some("age"), Some("years"), Some("person"), None)
        );

        let aliased = ColumnReference {
            table: TableReference::Table {
                name: "Person".into(),
                alias: Some("p".into()),
            },
            column: "age".into(),
        };
        assert!(matches!(
            aliased.value(&row),
            Err(Error::SchemaMismatch(_))
        ));
    }
}
