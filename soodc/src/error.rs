//! Driver error type (SPEC_FULL.md §7 "ambient").
//!
//! Wraps the three failure domains the driver can see: I/O, frontend
//! parsing, and lowering/toolchain. One variant per domain via `#[from]`,
//! matching the lightweight `thiserror` style used across the example
//! pack rather than a full diagnostic-rendering crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] sood_syntax::ParseError),

    #[error("codegen error: {0}")]
    Codegen(#[from] sood_codegen::CodegenError),

    #[error("toolchain failure during {stage}: {details}")]
    ToolchainFailure { stage: String, details: String },
}
