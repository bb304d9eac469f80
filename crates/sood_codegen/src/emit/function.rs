//! Function declaration lowering (spec.md §4.4 "FunctionDecl").

use inkwell::module::Linkage;
use inkwell::types::BasicMetadataTypeEnum;

use sood_ast::{Param, Stmt};

use crate::context::Context;
use crate::emit::stmt::lower_stmt;
use crate::error::CodegenError;
use crate::types::SoodType;

/// Saves the current insert point, builds the function, lowers its body,
/// then restores the insert point to the saved block — the function
/// declaration's own value is the function handle, and subsequent
/// statements in the enclosing block resume in the block they were in
/// before this declaration was lowered (spec.md §5 "insert-point
/// save/restore discipline").
pub fn lower_function_decl<'ctx>(
    ctx: &mut Context<'ctx>,
    return_type: &str,
    name: &str,
    params: &[Param],
    body: &[Stmt],
) -> Result<(), CodegenError> {
    tracing::debug!(name, params = params.len(), "lowering function declaration");
    let saved_block = ctx.current_block();

    let return_sood_ty = SoodType::from_name(return_type)?;
    let mut param_sood_types = Vec::with_capacity(params.len());
    let mut param_llvm_types: Vec<BasicMetadataTypeEnum<'ctx>> = Vec::with_capacity(params.len());
    for param in params {
        let ty = SoodType::from_name(&param.type_name)?;
        param_sood_types.push(ty);
        param_llvm_types.push(ctx.backend_type(ty).into());
    }

    let fn_type = ctx.backend_type(return_sood_ty).fn_type(&param_llvm_types, false);
    let function = ctx.module().add_function(name, fn_type, Some(Linkage::Internal));
    let entry = ctx.llcx().append_basic_block(function, "entry");

    ctx.push_scope(entry);
    ctx.builder().position_at_end(entry);

    for (i, (param, ty)) in params.iter().zip(param_sood_types.iter().copied()).enumerate() {
        let incoming = function
            .get_nth_param(i as u32)
            .unwrap_or_else(|| panic!("parameter {i} not found on declared function"));
        incoming.set_name(&param.name);

        let backend_ty = ctx.backend_type(ty);
        let slot = ctx
            .builder()
            .build_alloca(backend_ty, &param.name)
            .expect("build_alloca");
        ctx.builder().build_store(slot, incoming).expect("build_store");
        ctx.set_local(&param.name, slot, ty);
    }

    for stmt in body {
        lower_stmt(ctx, stmt)?;
    }

    ctx.pop_scope();
    ctx.builder().position_at_end(saved_block);
    Ok(())
}
