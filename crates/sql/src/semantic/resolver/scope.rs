//! A single statement's name scope

use super::TableReference;
use crate::error::{Error, Result};
use crate::parsing::ast::Expression;

/// A FROM item registered in a scope, with the column names it exposes.
#[derive(Debug, Clone)]
pub struct ScopeEntry {
    pub reference: TableReference,
    pub columns: Vec<String>,
}

impl ScopeEntry {
    /// The entry's spelling of a column, matched case-insensitively.
    pub fn exposes(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(column))
            .map(String::as_str)
    }
}

/// The FROM items and select-list aliases of one statement, in declaration
/// order. Outer scopes are never consulted.
#[derive(Debug, Default)]
pub struct Scope {
    entries: Vec<ScopeEntry>,
    aliases: Vec<(String, Expression)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a FROM item. Two items may not share a binding name.
    pub fn register(&mut self, reference: TableReference, columns: Vec<String>) -> Result<()> {
        if let Some(binding) = reference.binding()
            && self.find(binding).is_some()
        {
            return Err(Error::DuplicateTable(binding.to_string()));
        }
        self.entries.push(ScopeEntry { reference, columns });
        Ok(())
    }

    /// Records a select-list alias. The first alias of a name wins.
    pub fn alias(&mut self, name: &str, expr: &Expression) {
        if self.select_alias(name).is_none() {
            self.aliases.push((name.to_string(), expr.clone()));
        }
    }

    pub fn entries(&self) -> &[ScopeEntry] {
        &self.entries
    }

    /// The entry addressed by a qualifier.
    pub fn find(&self, qualifier: &str) -> Option<&ScopeEntry> {
        self.entries
            .iter()
            .find(|e| e.reference.is_addressed_by(qualifier))
    }

    pub fn select_alias(&self, name: &str) -> Option<&Expression> {
        self.aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, expr)| expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, alias: Option<&str>) -> TableReference {
        TableReference::Table {
            name: name.into(),
            alias: alias.map(Into::into),
        }
    }

    #[test]
    fn test_register_rejects_duplicate_bindings() {
        let mut scope = Scope::new();
        scope.register(table("Employees", None), vec![]).unwrap();
        scope.register(table("Employees", Some("e")), vec![]).unwrap();
        assert_eq!(
            scope.register(table("Departments", Some("E")), vec![]),
            Err(Error::DuplicateTable("E".into()))
        );
        assert_eq!(
            scope.register(table("employees", None), vec![]),
            Err(Error::DuplicateTable("employees".into()))
        );
        // Unaliased subqueries have no binding to collide on.
        scope
            .register(TableReference::Derived { alias: None }, vec![])
            .unwrap();
        scope
            .register(TableReference::Derived { alias: None }, vec![])
            .unwrap();
        assert_eq!(scope.entries().len(), 4);
    }

    #[test]
    fn test_select_alias_first_wins() {
        let mut scope = Scope::new();
        scope.alias("income", &Expression::column("salary"));
        scope.alias("INCOME", &Expression::column("age"));
        assert_eq!(
            scope.select_alias("Income"),
            Some(&Expression::column("salary"))
        );
        assert_eq!(scope.select_alias("salary"), None);
    }
}
