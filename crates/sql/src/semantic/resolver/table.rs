//! Table references registered by FROM items

use crate::types::ColumnDescriptor;
use std::fmt;

/// A FROM item visible in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReference {
    /// A schema table, optionally aliased. The name keeps the schema spelling.
    Table { name: String, alias: Option<String> },
    /// The output of a subquery. Its columns carry no source table.
    Derived { alias: Option<String> },
}

impl TableReference {
    /// The name the reference is addressed by: the alias if there is one,
    /// otherwise the table name. Unaliased subqueries have none.
    pub fn binding(&self) -> Option<&str> {
        match self {
            Self::Table { name, alias } => Some(alias.as_deref().unwrap_or(name)),
            Self::Derived { alias } => alias.as_deref(),
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Table { alias, .. } | Self::Derived { alias } => alias.as_deref(),
        }
    }

    /// The source table name descriptors of this reference carry.
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Self::Table { name, .. } => Some(name),
            Self::Derived { .. } => None,
        }
    }

    /// Whether a column qualifier addresses this reference.
    pub fn is_addressed_by(&self, qualifier: &str) -> bool {
        self.binding()
            .is_some_and(|binding| binding.eq_ignore_ascii_case(qualifier))
    }

    /// Whether a descriptor of a FROM row set belongs to this reference. Two
    /// aliases of the same table never share descriptors.
    pub fn owns(&self, descriptor: &ColumnDescriptor) -> bool {
        let table_matches = match (self.table_name(), descriptor.table_name()) {
            (Some(name), Some(source)) => name.eq_ignore_ascii_case(source),
            (None, None) => true,
            _ => false,
        };
        table_matches && descriptor.table_alias() == self.alias()
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias: None } => write!(f, "{}", name),
            Self::Table {
                name,
                alias: Some(alias),
            } => write!(f, "{} AS {}", name, alias),
            Self::Derived { alias: Some(alias) } => write!(f, "(subquery) AS {}", alias),
            Self::Derived { alias: None } => write!(f, "(subquery)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_prefers_alias() {
        let plain = TableReference::Table {
            name: "Employees".into(),
            alias: None,
        };
        let aliased = TableReference::Table {
            name: "Employees".into(),
            alias: Some("e".into()),
        };
        assert!(plain.is_addressed_by("employees"));
        assert!(aliased.is_addressed_by("E"));
        assert!(!aliased.is_addressed_by("Employees"));
        assert!(!TableReference::Derived { alias: None }.is_addressed_by(""));
    }

    #[test]
    fn test_owns_separates_self_join_aliases() {
        let c1 = TableReference::Table {
            name: "Categories".into(),
            alias: Some("c1".into()),
        };
        let column = ColumnDescriptor::table_column("id", "Categories");
        assert!(!c1.owns(&column));
        assert!(c1.owns(&column.clone().with_table_alias(Some("c1"))));
        assert!(!c1.owns(&column.with_table_alias(Some("c2"))));

        let derived = TableReference::Derived {
            alias: Some("s".into()),
        };
        assert!(derived.owns(&ColumnDescriptor::new(
            Some("salary"),
            Some("salary"),
            None,
            Some("s")
        )));
    }
}
