//! Column and table name resolution
//!
//! The resolver keeps one scope per statement being evaluated, innermost on
//! top. FROM items are registered into the top scope as they are evaluated,
//! and column mentions resolve against the top scope only: subqueries do not
//! see the aliases of their enclosing statement.

pub mod column;
pub mod scope;
pub mod table;

pub use column::ColumnReference;
pub use scope::{Scope, ScopeEntry};
pub use table::TableReference;

use crate::config::AmbiguityPolicy;
use crate::error::{Error, Result};
use crate::parsing::ast::Expression;
use crate::types::{ColumnDescriptor, Schema};

/// Resolves table and column mentions against a stack of scopes.
pub struct Resolver<'a> {
    schema: &'a Schema,
    policy: AmbiguityPolicy,
    scopes: Vec<Scope>,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema, policy: AmbiguityPolicy) -> Self {
        Self {
            schema,
            policy,
            scopes: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Number of entered scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Enters a new, empty scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        tracing::trace!(depth = self.scopes.len(), "entered scope");
    }

    /// Leaves the innermost scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        tracing::trace!(depth = self.scopes.len(), "left scope");
    }

    fn current(&self, mention: &str) -> Result<&Scope> {
        self.scopes
            .last()
            .ok_or_else(|| Error::NoActiveScope(mention.to_string()))
    }

    fn current_mut(&mut self, mention: &str) -> Result<&mut Scope> {
        self.scopes
            .last_mut()
            .ok_or_else(|| Error::NoActiveScope(mention.to_string()))
    }

    /// Registers a schema table under an optional alias, returning its
    /// reference with the schema's spelling of the name.
    pub fn register_table(&mut self, name: &str, alias: Option<&str>) -> Result<TableReference> {
        let table = self.schema.table(name)?;
        let reference = TableReference::Table {
            name: table.name.clone(),
            alias: alias.map(str::to_string),
        };
        self.current_mut(name)?
            .register(reference.clone(), table.columns.clone())?;
        Ok(reference)
    }

    /// Registers a subquery's output. Its exposed columns are the source
    /// column names of the given descriptors.
    pub fn register_derived(
        &mut self,
        alias: Option<&str>,
        columns: &[ColumnDescriptor],
    ) -> Result<TableReference> {
        let reference = TableReference::Derived {
            alias: alias.map(str::to_string),
        };
        let exposed = columns
            .iter()
            .filter_map(|c| c.column_name().map(str::to_string))
            .collect();
        self.current_mut(alias.unwrap_or("(subquery)"))?
            .register(reference.clone(), exposed)?;
        Ok(reference)
    }

    /// Records the aliases of a select list, so unqualified mentions that no
    /// FROM item exposes can fall back to them.
    pub fn register_select_aliases(&mut self, select: &[(Expression, Option<String>)]) -> Result<()> {
        let scope = self.current_mut("select list")?;
        for (expr, alias) in select {
            if let Some(alias) = alias {
                scope.alias(alias, expr);
            }
        }
        Ok(())
    }

    /// The select-list expression aliased under a name, if any.
    pub fn select_alias(&self, name: &str) -> Option<&Expression> {
        self.scopes.last()?.select_alias(name)
    }

    /// Resolves a table qualifier to the FROM item it addresses.
    pub fn resolve_table(&self, qualifier: &str) -> Result<&TableReference> {
        self.current(qualifier)?
            .find(qualifier)
            .map(|entry| &entry.reference)
            .ok_or_else(|| Error::TableNotFound(qualifier.to_string()))
    }

    /// Resolves a possibly qualified column mention.
    ///
    /// A qualified mention must name a FROM item of the current scope that
    /// exposes the column. An unqualified mention resolves to the first
    /// declared FROM item exposing the column; under the strict policy a
    /// second one is an error.
    pub fn resolve(&self, table: Option<&str>, column: &str) -> Result<ColumnReference> {
        let scope = self.current(column)?;

        if let Some(qualifier) = table {
            let entry = scope
                .find(qualifier)
                .ok_or_else(|| Error::TableNotFound(qualifier.to_string()))?;
            let resolved = entry
                .exposes(column)
                .ok_or_else(|| Error::ColumnNotFound(format!("{}.{}", qualifier, column)))?;
            return Ok(ColumnReference {
                table: entry.reference.clone(),
                column: resolved.to_string(),
            });
        }

        let mut candidates = scope
            .entries()
            .iter()
            .filter_map(|entry| entry.exposes(column).map(|c| (entry, c)));
        let Some((entry, resolved)) = candidates.next() else {
            return Err(Error::ColumnNotFound(column.to_string()));
        };
        if let Some((other, _)) = candidates.next() {
            match self.policy {
                AmbiguityPolicy::Reject => {
                    return Err(Error::AmbiguousColumn(column.to_string()));
                }
                AmbiguityPolicy::FirstDeclared => tracing::debug!(
                    column,
                    winner = %entry.reference,
                    other = %other.reference,
                    "ambiguous column resolved to first declared table"
                ),
            }
        }
        Ok(ColumnReference {
            table: entry.reference.clone(),
            column: resolved.to_string(),
        })
    }
}
