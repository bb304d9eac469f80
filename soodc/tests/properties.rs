//! Property-based tests (spec.md §8 "Property-based suggestions"):
//! random well-typed arithmetic expressions over `{integer, float}` lower
//! without error, and random identifier tables round-trip through the
//! scope stack's top frame.

#![expect(clippy::expect_used, reason = "Tests use expect for brevity")]

use inkwell::context::Context as LlvmContext;
use proptest::prelude::*;
use sood_ast::{BinaryOp, Expr, Stmt};
use sood_codegen::Context;

// Only true arithmetic ops: a comparison produces an i1, and a sibling
// numeric literal produces i64/f64, so mixing one into an internal tree
// node feeds `build_int_add`/`build_float_add` a width-mismatched operand
// that `promote_binary` does not (and should not) rescue.
fn arith_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
    ]
}

fn numeric_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-1000..1000i64).prop_map(Expr::IntegerLiteral),
        (-1000.0..1000.0f64).prop_map(Expr::FloatLiteral),
    ]
}

fn arith_tree() -> impl Strategy<Value = Expr> {
    let leaf = numeric_leaf();
    leaf.prop_recursive(4, 32, 4, |inner| {
        (arith_op(), inner.clone(), inner).prop_map(|(op, lhs, rhs)| Expr::BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    })
}

proptest! {
    /// Lowering any random well-typed {integer, float} arithmetic
    /// expression tree, wrapped in a `write`, succeeds and produces a
    /// verifiable module.
    #[test]
    fn well_typed_arithmetic_always_lowers(expr in arith_tree()) {
        let program = vec![Stmt::Write { value: expr, sink: None }];
        let llcx = LlvmContext::create();
        let mut ctx = Context::new(&llcx, "prop_mod");
        ctx.generate(&program).expect("well-typed arithmetic must lower");
        ctx.verify().expect("lowered module must verify");
    }

    /// A random sequence of distinct identifier names round-trips through
    /// `set_local`/`get_local` on the top scope frame.
    #[test]
    fn scope_top_round_trips(names in prop::collection::hash_set("[a-z][a-z0-9_]{0,8}", 1..12)) {
        let llcx = LlvmContext::create();
        let mut ctx = Context::new(&llcx, "prop_mod");
        let module = ctx.module();
        let func = module.add_function("scratch", llcx.void_type().fn_type(&[], false), None);
        let entry = llcx.append_basic_block(func, "entry");
        ctx.push_scope(entry);
        ctx.builder().position_at_end(entry);

        for name in &names {
            let slot = ctx
                .builder()
                .build_alloca(llcx.i64_type(), name)
                .expect("build_alloca");
            ctx.set_local(name, slot, sood_codegen::SoodType::Integer);
        }

        for name in &names {
            let (_, ty) = ctx.get_local(name).expect("declared local must resolve");
            prop_assert_eq!(ty, sood_codegen::SoodType::Integer);
        }
    }
}
