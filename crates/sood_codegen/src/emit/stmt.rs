//! Statement lowering rules (spec.md §4.4 "Statements").

use inkwell::values::BasicValueEnum;

use sood_ast::Stmt;

use crate::context::Context;
use crate::emit::expr::lower_expr;
use crate::error::CodegenError;
use crate::types::{zero_value, SoodType};

pub fn lower_stmt<'ctx>(ctx: &mut Context<'ctx>, stmt: &Stmt) -> Result<(), CodegenError> {
    lower_stmt_value(ctx, stmt).map(|_| ())
}

/// Like [`lower_stmt`], but also surfaces the value of `ExpressionStatement`
/// so that [`crate::emit::expr::lower_expr`]'s `Block` arm can compute "the
/// value of the last statement" (spec.md §4.4 "Block").
pub(crate) fn lower_stmt_value<'ctx>(
    ctx: &mut Context<'ctx>,
    stmt: &Stmt,
) -> Result<Option<(BasicValueEnum<'ctx>, SoodType)>, CodegenError> {
    match stmt {
        Stmt::VariableDecl {
            type_name,
            name,
            init,
        } => {
            lower_variable_decl(ctx, type_name, name, init.as_ref())?;
            Ok(None)
        }
        Stmt::FunctionDecl {
            return_type,
            name,
            params,
            body,
        } => {
            crate::emit::function::lower_function_decl(ctx, return_type, name, params, body)?;
            Ok(None)
        }
        Stmt::Return(expr) => {
            let (value, _ty) = lower_expr(ctx, expr)?;
            ctx.builder().build_return(Some(&value)).expect("build_return");
            Ok(None)
        }
        Stmt::ExpressionStatement(expr) => {
            let result = lower_expr(ctx, expr)?;
            Ok(Some(result))
        }
        Stmt::If {
            cond,
            then_block,
            else_branch,
        } => {
            crate::emit::control_flow::lower_if(ctx, cond, then_block, else_branch.as_deref())?;
            Ok(None)
        }
        Stmt::While { cond, body } => {
            crate::emit::control_flow::lower_while(ctx, cond, body)?;
            Ok(None)
        }
        Stmt::Until { cond, body } => {
            crate::emit::control_flow::lower_until(ctx, cond, body)?;
            Ok(None)
        }
        Stmt::Write { value, sink: _ } => {
            lower_write(ctx, value)?;
            Ok(None)
        }
        Stmt::Read { target: _ } => Err(CodegenError::Unimplemented("read".to_string())),
    }
}

fn lower_variable_decl<'ctx>(
    ctx: &mut Context<'ctx>,
    type_name: &str,
    name: &str,
    init: Option<&sood_ast::Expr>,
) -> Result<(), CodegenError> {
    let ty = SoodType::from_name(type_name)?;
    let backend_ty = ctx.backend_type(ty);
    let slot = ctx.builder().build_alloca(backend_ty, name).expect("build_alloca");

    let value = match init {
        Some(expr) => lower_expr(ctx, expr)?.0,
        None => zero_value(ctx.llcx(), ctx.builder(), ty),
    };
    ctx.builder().build_store(slot, value).expect("build_store");
    ctx.set_local(name, slot, ty);
    Ok(())
}

fn lower_write<'ctx>(ctx: &mut Context<'ctx>, value: &sood_ast::Expr) -> Result<(), CodegenError> {
    let (val, ty) = lower_expr(ctx, value)?;
    let fmt_name = match ty {
        // Float shares the integer specifier — a documented limitation
        // pinned by spec.md §8 end-to-end scenario 2 (see SPEC_FULL.md
        // Open Question 2).
        SoodType::Integer | SoodType::Float => "numeric",
        SoodType::String => "string",
    };
    let fmt_ptr = ctx.fmt_specifier(fmt_name);
    ctx.builder()
        .build_call(ctx.printf_fn(), &[fmt_ptr.into(), val.into()], "printf_call")
        .expect("build_call");
    Ok(())
}
