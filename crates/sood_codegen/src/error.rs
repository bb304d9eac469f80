//! Error kinds raised by lowering.
//!
//! No lowering rule returns a null/placeholder value on failure (a
//! historical behavior the original source relied on) — every rule that
//! cannot produce a value raises one of these instead.

use sood_ast::{BinaryOp, UnaryOp};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodegenError {
    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("invalid unary operator '{0}'")]
    InvalidUnaryOp(UnaryOp),

    #[error("invalid binary operator '{0}'")]
    InvalidBinaryOp(BinaryOp),

    #[error("unsupported operand types for '{op}': {lhs_type} and {rhs_type}")]
    UnsupportedOperandTypes {
        op: BinaryOp,
        lhs_type: String,
        rhs_type: String,
    },

    #[error("unsupported type for write: {0}")]
    UnsupportedWriteType(String),

    #[error("cannot implicitly coerce between string and non-string in assignment")]
    StringCoercion,

    #[error("unimplemented feature: {0}")]
    Unimplemented(String),

    #[error("toolchain failure during {stage}: {details}")]
    ToolchainFailure { stage: String, details: String },
}
