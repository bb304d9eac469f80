//! IR Emitter (spec.md §4.4): one lowering rule per AST variant.

pub mod control_flow;
pub mod expr;
pub mod function;
pub mod stmt;

use sood_ast::Stmt;

use crate::context::Context;
use crate::error::CodegenError;

/// Lowers an ordered sequence of statements (a `Block` used as a function
/// body or the top-level program) in declaration order.
pub fn lower_block<'ctx>(ctx: &mut Context<'ctx>, stmts: &[Stmt]) -> Result<(), CodegenError> {
    for stmt in stmts {
        stmt::lower_stmt(ctx, stmt)?;
    }
    Ok(())
}
