//! Expression lowering rules (spec.md §4.4 "Expressions").

use inkwell::values::BasicValueEnum;
use inkwell::{FloatPredicate, IntPredicate};

use sood_ast::{BinaryOp, Expr, UnaryOp};

use crate::context::Context;
use crate::error::CodegenError;
use crate::types::{assignment_cast, promote_binary, SoodType};

/// Lowers an expression to its IR value and resolved `SoodType`. Every
/// branch either returns a value or raises a `CodegenError` — no branch
/// returns a null placeholder (spec.md §4.4 "Failure semantics").
pub fn lower_expr<'ctx>(
    ctx: &mut Context<'ctx>,
    expr: &Expr,
) -> Result<(BasicValueEnum<'ctx>, SoodType), CodegenError> {
    match expr {
        Expr::IntegerLiteral(v) => {
            let val = ctx.llcx().i64_type().const_int(*v as u64, true);
            Ok((val.into(), SoodType::Integer))
        }
        Expr::FloatLiteral(v) => {
            let val = ctx.llcx().f64_type().const_float(*v);
            Ok((val.into(), SoodType::Float))
        }
        Expr::StringLiteral(raw) => {
            let decoded = decode_escapes(raw);
            let ptr = ctx
                .builder()
                .build_global_string_ptr(&decoded, "str_lit")
                .expect("build_global_string_ptr")
                .as_pointer_value();
            Ok((ptr.into(), SoodType::String))
        }
        Expr::Identifier(name) => {
            let (ptr, ty) = ctx
                .get_local(name)
                .ok_or_else(|| CodegenError::UnknownIdentifier(name.clone()))?;
            let backend_ty = ctx.backend_type(ty);
            let loaded = ctx
                .builder()
                .build_load(backend_ty, ptr, name)
                .expect("build_load");
            Ok((loaded, ty))
        }
        Expr::UnaryExpr { op, operand } => lower_unary(ctx, *op, operand),
        Expr::BinaryExpr { op, lhs, rhs } => lower_binary(ctx, *op, lhs, rhs),
        Expr::FunctionCall { callee, args } => lower_call(ctx, callee, args),
        Expr::Block(stmts) => lower_block_expr(ctx, stmts),
        Expr::Assignment { target, value } => lower_assignment(ctx, target, value),
    }
}

/// Escape decoding: `\n`, `\r`, `\t`, `\\` are replaced in-place; the
/// backslash escape is checked last within each step so that a literal
/// `\\n` in source (an escaped backslash followed by `n`) decodes to a
/// backslash and an `n`, not a newline.
fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('r') => {
                out.push('\r');
                chars.next();
            }
            Some('t') => {
                out.push('\t');
                chars.next();
            }
            Some('\\') => {
                out.push('\\');
                chars.next();
            }
            _ => out.push('\\'),
        }
    }
    out
}

fn lower_unary<'ctx>(
    ctx: &mut Context<'ctx>,
    op: UnaryOp,
    operand: &Expr,
) -> Result<(BasicValueEnum<'ctx>, SoodType), CodegenError> {
    let (val, ty) = lower_expr(ctx, operand)?;
    match op {
        UnaryOp::Not => {
            let int_val = val.into_int_value();
            let result = ctx.builder().build_not(int_val, "not").expect("build_not");
            Ok((result.into(), ty))
        }
        UnaryOp::Neg => {
            let float_val = val.into_float_value();
            let result = ctx
                .builder()
                .build_float_neg(float_val, "fneg")
                .expect("build_float_neg");
            Ok((result.into(), ty))
        }
    }
}

fn lower_binary<'ctx>(
    ctx: &mut Context<'ctx>,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<(BasicValueEnum<'ctx>, SoodType), CodegenError> {
    let (lhs_val, lhs_ty) = lower_expr(ctx, lhs)?;
    let (rhs_val, rhs_ty) = lower_expr(ctx, rhs)?;

    let (lhs_val, rhs_val, operand_ty) =
        promote_binary(ctx.llcx(), ctx.builder(), op, lhs_val, lhs_ty, rhs_val, rhs_ty)?;

    let is_float = matches!(operand_ty, SoodType::Float);

    if op.is_comparison() {
        let result = if is_float {
            let pred = match op {
                BinaryOp::Eq => FloatPredicate::OEQ,
                BinaryOp::Ne => FloatPredicate::ONE,
                BinaryOp::Lt => FloatPredicate::OLT,
                BinaryOp::Le => FloatPredicate::OLE,
                BinaryOp::Gt => FloatPredicate::OGT,
                BinaryOp::Ge => FloatPredicate::OGE,
                _ => unreachable!("is_comparison guards this match"),
            };
            ctx.builder()
                .build_float_compare(pred, lhs_val.into_float_value(), rhs_val.into_float_value(), "fcmp")
                .expect("build_float_compare")
        } else {
            let pred = match op {
                BinaryOp::Eq => IntPredicate::EQ,
                BinaryOp::Ne => IntPredicate::NE,
                BinaryOp::Lt => IntPredicate::SLT,
                BinaryOp::Le => IntPredicate::SLE,
                BinaryOp::Gt => IntPredicate::SGT,
                BinaryOp::Ge => IntPredicate::SGE,
                _ => unreachable!("is_comparison guards this match"),
            };
            ctx.builder()
                .build_int_compare(pred, lhs_val.into_int_value(), rhs_val.into_int_value(), "icmp")
                .expect("build_int_compare")
        };
        return Ok((result.into(), SoodType::Integer));
    }

    let result: BasicValueEnum<'ctx> = match op {
        BinaryOp::Add if is_float => ctx
            .builder()
            .build_float_add(lhs_val.into_float_value(), rhs_val.into_float_value(), "fadd")
            .expect("build_float_add")
            .into(),
        BinaryOp::Add => ctx
            .builder()
            .build_int_add(lhs_val.into_int_value(), rhs_val.into_int_value(), "iadd")
            .expect("build_int_add")
            .into(),
        BinaryOp::Sub if is_float => ctx
            .builder()
            .build_float_sub(lhs_val.into_float_value(), rhs_val.into_float_value(), "fsub")
            .expect("build_float_sub")
            .into(),
        BinaryOp::Sub => ctx
            .builder()
            .build_int_sub(lhs_val.into_int_value(), rhs_val.into_int_value(), "isub")
            .expect("build_int_sub")
            .into(),
        BinaryOp::Mul if is_float => ctx
            .builder()
            .build_float_mul(lhs_val.into_float_value(), rhs_val.into_float_value(), "fmul")
            .expect("build_float_mul")
            .into(),
        BinaryOp::Mul => ctx
            .builder()
            .build_int_mul(lhs_val.into_int_value(), rhs_val.into_int_value(), "imul")
            .expect("build_int_mul")
            .into(),
        BinaryOp::Div if is_float => ctx
            .builder()
            .build_float_div(lhs_val.into_float_value(), rhs_val.into_float_value(), "fdiv")
            .expect("build_float_div")
            .into(),
        BinaryOp::Div => ctx
            .builder()
            .build_int_signed_div(lhs_val.into_int_value(), rhs_val.into_int_value(), "idiv")
            .expect("build_int_signed_div")
            .into(),
        BinaryOp::Mod if is_float => ctx
            .builder()
            .build_float_rem(lhs_val.into_float_value(), rhs_val.into_float_value(), "frem")
            .expect("build_float_rem")
            .into(),
        BinaryOp::Mod => ctx
            .builder()
            .build_int_signed_rem(lhs_val.into_int_value(), rhs_val.into_int_value(), "irem")
            .expect("build_int_signed_rem")
            .into(),
        // Sood treats logical and bitwise identically (spec.md §4.4).
        BinaryOp::And => ctx
            .builder()
            .build_and(lhs_val.into_int_value(), rhs_val.into_int_value(), "and")
            .expect("build_and")
            .into(),
        BinaryOp::Or => ctx
            .builder()
            .build_or(lhs_val.into_int_value(), rhs_val.into_int_value(), "or")
            .expect("build_or")
            .into(),
        _ => return Err(CodegenError::InvalidBinaryOp(op)),
    };

    Ok((result, operand_ty))
}

fn lower_call<'ctx>(
    ctx: &mut Context<'ctx>,
    callee: &str,
    args: &[Expr],
) -> Result<(BasicValueEnum<'ctx>, SoodType), CodegenError> {
    let func = ctx
        .module()
        .get_function(callee)
        .ok_or_else(|| CodegenError::UnknownFunction(callee.to_string()))?;

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        let (val, _ty) = lower_expr(ctx, arg)?;
        arg_values.push(val.into());
    }

    let call_site = ctx
        .builder()
        .build_call(func, &arg_values, "call")
        .expect("build_call");

    let value = call_site
        .try_as_basic_value()
        .basic()
        .unwrap_or_else(|| ctx.llcx().i64_type().const_zero().into());
    // The function's return type isn't tracked in a separate signature
    // table; classify it back from the produced value (spec.md §4.3's
    // closed {integer, float, string} set makes this unambiguous).
    let return_ty = SoodType::of_value(value).unwrap_or(SoodType::Integer);
    Ok((value, return_ty))
}

fn lower_block_expr<'ctx>(
    ctx: &mut Context<'ctx>,
    stmts: &[sood_ast::Stmt],
) -> Result<(BasicValueEnum<'ctx>, SoodType), CodegenError> {
    let mut last = None;
    for stmt in stmts {
        last = crate::emit::stmt::lower_stmt_value(ctx, stmt)?;
    }
    Ok(last.unwrap_or_else(|| (ctx.llcx().i64_type().const_zero().into(), SoodType::Integer)))
}

fn lower_assignment<'ctx>(
    ctx: &mut Context<'ctx>,
    target: &str,
    value: &Expr,
) -> Result<(BasicValueEnum<'ctx>, SoodType), CodegenError> {
    let (ptr, target_ty) = ctx
        .get_local(target)
        .ok_or_else(|| CodegenError::UnknownIdentifier(target.to_string()))?;
    let (source_val, source_ty) = lower_expr(ctx, value)?;
    let casted = assignment_cast(ctx.llcx(), ctx.builder(), target_ty, source_ty, source_val)?;
    ctx.builder().build_store(ptr, casted).expect("build_store");
    Ok((casted, target_ty))
}
