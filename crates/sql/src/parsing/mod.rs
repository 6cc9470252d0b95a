//! SQL parser module
//!
//! Parses raw SQL strings into a structured Abstract Syntax Tree (AST). The
//! evaluator works on the AST alone, so callers holding an AST from elsewhere
//! can skip this module entirely.

pub mod ast;
mod lexer;
mod parser;

use crate::error::Result;

pub use lexer::{Keyword, Lexer, Token};
pub use parser::Parser;

pub use ast::Statement;

/// Parse a SQL statement string into an AST
pub fn parse_sql(sql: &str) -> Result<Statement> {
    Parser::parse(sql)
}
