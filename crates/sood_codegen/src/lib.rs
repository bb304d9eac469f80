//! LLVM lowering for the Sood compiler (spec.md §4.2-§4.4).
//!
//! Three cooperating pieces: the [`Context`] (Lowering Context, §4.2), the
//! [`types`] module (Type & Cast Resolver, §4.3), and [`emit`] (IR
//! Emitter, §4.4). Every lowering rule takes the context explicitly — no
//! process-wide globals (spec.md §9 "Global state").

mod context;
mod emit;
mod error;
mod types;

pub use context::Context;
pub use error::CodegenError;
pub use types::SoodType;
