//! Error types for heuristic SQL evaluation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Resolution errors
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Ambiguous column reference: {0}")]
    AmbiguousColumn(String),

    #[error("Table or alias declared more than once: {0}")]
    DuplicateTable(String),

    #[error("No active scope to resolve {0} against")]
    NoActiveScope(String),

    // Statement errors
    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("SQL parse error: {0}")]
    ParseError(String),

    // Data errors
    #[error("Snapshot does not match schema: {0}")]
    SchemaMismatch(String),

    #[error("Column count mismatch: expected {expected}, found {found}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] sqlfit_truthness::Error),
}

impl Error {
    /// Whether a table or column mention could not be matched against the
    /// current scope.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Error::TableNotFound(_)
                | Error::ColumnNotFound(_)
                | Error::AmbiguousColumn(_)
                | Error::DuplicateTable(_)
                | Error::NoActiveScope(_)
        )
    }

    /// Whether the statement kind has no evaluation strategy. Callers must not
    /// read this as a false predicate.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::UnsupportedStatement(_))
    }
}
