//! Semantic analysis: name resolution for evaluated statements

pub mod resolver;

pub use resolver::{ColumnReference, Resolver, TableReference};
