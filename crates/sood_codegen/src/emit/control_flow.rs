//! Control-flow state machines (spec.md §4.4 "Control-flow state
//! machines"). Phi-less by spec mandate (Open Question 3): `If` yields no
//! value.

use inkwell::values::IntValue;
use inkwell::IntPredicate;

use sood_ast::{ElseBranch, Expr, Stmt};

use crate::context::Context;
use crate::emit::expr::lower_expr;
use crate::emit::stmt::lower_stmt;
use crate::error::CodegenError;

/// Lowers `cond` and reduces it to a one-bit truth value by comparing it
/// not-equal to `not_equal_to` (0 for if/while, 1/true for until).
fn reduce_condition<'ctx>(
    ctx: &mut Context<'ctx>,
    cond: &Expr,
    not_equal_to: u64,
) -> Result<IntValue<'ctx>, CodegenError> {
    let (value, _ty) = lower_expr(ctx, cond)?;
    let int_val = value.into_int_value();
    let zero_or_true = int_val.get_type().const_int(not_equal_to, false);
    let truth = ctx
        .builder()
        .build_int_compare(IntPredicate::NE, int_val, zero_or_true, "cond_truth")
        .expect("build_int_compare");
    Ok(truth)
}

pub fn lower_if<'ctx>(
    ctx: &mut Context<'ctx>,
    cond: &Expr,
    then_block: &[Stmt],
    else_branch: Option<&ElseBranch>,
) -> Result<(), CodegenError> {
    let truth = reduce_condition(ctx, cond, 0)?;

    let function = ctx.current_block().get_parent().expect("block has parent function");
    let then_bb = ctx.llcx().append_basic_block(function, "if_then");
    let else_bb = ctx.llcx().append_basic_block(function, "if_else");
    let after_bb = ctx.llcx().append_basic_block(function, "if_after");
    tracing::trace!("created if/else/after blocks");

    ctx.builder()
        .build_conditional_branch(truth, then_bb, else_bb)
        .expect("build_conditional_branch");

    ctx.set_current_block(then_bb);
    ctx.builder().position_at_end(then_bb);
    for stmt in then_block {
        lower_stmt(ctx, stmt)?;
    }
    ctx.builder()
        .build_unconditional_branch(after_bb)
        .expect("build_unconditional_branch");

    ctx.set_current_block(else_bb);
    ctx.builder().position_at_end(else_bb);
    match else_branch {
        Some(ElseBranch::ElseIf(inner)) => lower_stmt(ctx, inner)?,
        Some(ElseBranch::Else(stmts)) => {
            for stmt in stmts {
                lower_stmt(ctx, stmt)?;
            }
        }
        None => {}
    }
    ctx.builder()
        .build_unconditional_branch(after_bb)
        .expect("build_unconditional_branch");

    ctx.set_current_block(after_bb);
    ctx.builder().position_at_end(after_bb);
    Ok(())
}

pub fn lower_while<'ctx>(
    ctx: &mut Context<'ctx>,
    cond: &Expr,
    body: &[Stmt],
) -> Result<(), CodegenError> {
    let function = ctx.current_block().get_parent().expect("block has parent function");
    let cond_bb = ctx.llcx().append_basic_block(function, "while_cond");
    let body_bb = ctx.llcx().append_basic_block(function, "while_body");
    let after_bb = ctx.llcx().append_basic_block(function, "while_after");
    tracing::trace!("created while_cond/while_body/while_after blocks");

    ctx.builder()
        .build_unconditional_branch(cond_bb)
        .expect("build_unconditional_branch");

    ctx.set_current_block(cond_bb);
    ctx.builder().position_at_end(cond_bb);
    let truth = reduce_condition(ctx, cond, 0)?;
    ctx.builder()
        .build_conditional_branch(truth, body_bb, after_bb)
        .expect("build_conditional_branch");

    ctx.set_current_block(body_bb);
    ctx.builder().position_at_end(body_bb);
    for stmt in body {
        lower_stmt(ctx, stmt)?;
    }
    ctx.builder()
        .build_unconditional_branch(cond_bb)
        .expect("build_unconditional_branch");

    ctx.set_current_block(after_bb);
    ctx.builder().position_at_end(after_bb);
    Ok(())
}

/// Identical shape to [`lower_while`] except the reduced condition is
/// compared not-equal-to-**true** rather than not-equal-to-zero: loop while
/// the condition is false. `until cond { body }` is semantically `while
/// (!cond) { body }`.
pub fn lower_until<'ctx>(
    ctx: &mut Context<'ctx>,
    cond: &Expr,
    body: &[Stmt],
) -> Result<(), CodegenError> {
    let function = ctx.current_block().get_parent().expect("block has parent function");
    let cond_bb = ctx.llcx().append_basic_block(function, "until_cond");
    let body_bb = ctx.llcx().append_basic_block(function, "until_body");
    let after_bb = ctx.llcx().append_basic_block(function, "until_after");
    tracing::trace!("created until_cond/until_body/until_after blocks");

    ctx.builder()
        .build_unconditional_branch(cond_bb)
        .expect("build_unconditional_branch");

    ctx.set_current_block(cond_bb);
    ctx.builder().position_at_end(cond_bb);
    let truth = reduce_condition(ctx, cond, 1)?;
    ctx.builder()
        .build_conditional_branch(truth, body_bb, after_bb)
        .expect("build_conditional_branch");

    ctx.set_current_block(body_bb);
    ctx.builder().position_at_end(body_bb);
    for stmt in body {
        lower_stmt(ctx, stmt)?;
    }
    ctx.builder()
        .build_unconditional_branch(cond_bb)
        .expect("build_unconditional_branch");

    ctx.set_current_block(after_bb);
    ctx.builder().position_at_end(after_bb);
    Ok(())
}
