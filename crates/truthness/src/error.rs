//! Error types for truthness configuration

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Partial credit must lie strictly between 0 and 1, got {0}")]
    InvalidPartialCredit(f64),
}
