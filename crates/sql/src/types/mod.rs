//! The data model: values, schemas, row sets and table snapshots.

pub mod row_set;
pub mod schema;
pub mod snapshot;
pub mod value;

pub use row_set::{ColumnDescriptor, Row, RowSet};
pub use schema::{Schema, Table};
pub use snapshot::Snapshot;
pub use value::Value;
