//! Lexer and recursive-descent parser producing [`sood_ast`] trees.
//!
//! This crate is deliberately small: it exists so the rest of the
//! workspace (the driver, end-to-end tests) can be exercised against real
//! Sood source text rather than hand-built AST fixtures. Error recovery is
//! single-shot (first error wins); there is no incremental reparse or
//! diagnostic spanning beyond a byte offset.

mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use parser::parse_program;
