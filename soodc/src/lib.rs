//! Driver library for the Sood compiler CLI: argument parsing, pipeline
//! sequencing, and the ambient error type that ties them together
//! (SPEC_FULL.md §6-§7). Split from `main.rs` so integration tests can
//! drive the pipeline directly.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod tracing_setup;

pub use cli::Cli;
pub use error::DriverError;
