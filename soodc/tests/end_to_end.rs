//! Cross-crate end-to-end scenarios (spec.md §8), driven from real Sood
//! source text through the real lexer/parser/lowering pipeline. Assertions
//! are made on the printed IR text rather than captured JIT stdout — JIT
//! stdout capture is awkward to assert on deterministically in a unit
//! test, and scenario 2 itself asks for IR-structure assertions rather
//! than the formatted string.

#![expect(clippy::expect_used, reason = "Tests use expect for brevity")]
#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use inkwell::context::Context as LlvmContext;
use pretty_assertions::assert_eq;
use sood_codegen::Context;

fn lower(src: &str) -> String {
    let program = sood_syntax::parse_program(src).expect("parse");
    let llcx = LlvmContext::create();
    let mut ctx = Context::new(&llcx, "test_mod");
    ctx.generate(&program).expect("lowering");
    ctx.verify().expect("module must verify");
    ctx.print_ir()
}

#[test]
fn scenario_1_integer_write() {
    let ir = lower("integer x; x = 42; write x;");
    assert!(ir.contains("alloca i64"));
    assert!(ir.contains("store i64 42"));
    assert!(ir.contains("load i64"));
    assert!(ir.contains("@numeric_fmt_spec") || ir.contains("c\"%d"));
    assert_eq!(ir.matches("call i32 (ptr, ...) @printf").count(), 1);
}

#[test]
fn scenario_2_promotion_introduces_single_uitofp() {
    let ir = lower("float pi; pi = 3.14; integer n; n = 2; write pi * n;");
    assert_eq!(ir.matches("uitofp").count(), 1);
    assert!(ir.contains("fmul"));
    // Known limitation (Open Question 2): write of a double still uses the
    // numeric ("%d") specifier, not a distinct float one.
    assert_eq!(ir.matches("call i32 (ptr, ...) @printf").count(), 1);
}

#[test]
fn scenario_3_if_else_has_four_blocks() {
    let ir = lower("if 1 == 1 { write \"yes\"; } else { write \"no\"; };");
    for label in ["entry:", "if_then:", "if_else:", "if_after:"] {
        assert!(ir.contains(label), "missing block {label} in:\n{ir}");
    }
    assert!(ir.contains("br i1"));
    assert!(ir.contains("yes"));
    assert!(ir.contains("no"));
}

#[test]
fn scenario_4_while_loop_has_three_blocks_and_back_edge() {
    let ir = lower("integer i; i = 0; while i < 3 { write i; i = i + 1; };");
    for label in ["while_cond:", "while_body:", "while_after:"] {
        assert!(ir.contains(label), "missing block {label} in:\n{ir}");
    }
    // The body block's terminator must branch back to while_cond.
    let body_start = ir.find("while_body:").expect("while_body block present");
    let body_slice = &ir[body_start..];
    let after_start = body_slice.find("while_after").unwrap_or(body_slice.len());
    assert!(body_slice[..after_start].contains("br label %while_cond"));
}

#[test]
fn scenario_5_function_add_is_internal() {
    let ir = lower("integer add(integer a, integer b) { return a + b; }; write add(2, 3);");
    assert!(ir.contains("define internal i64 @add(i64 %a, i64 %b)"));
    assert!(ir.contains("call i64 @add"));
}

#[test]
fn scenario_6_string_escape_decodes_real_newline() {
    let ir = lower("string s; s = \"hello\\nworld\"; write s;");
    assert!(ir.contains("hello\\0Aworld"), "expected decoded newline byte in:\n{ir}");
}

#[test]
fn nested_function_cannot_see_enclosing_scope() {
    // Scope lookup is scope-top only (spec.md §4.2, §9): a variable
    // declared in the enclosing top-level scope is unresolved inside a
    // nested function body.
    let program =
        sood_syntax::parse_program("integer outer; outer = 1; integer f() { return outer; };")
            .expect("parse");
    let llcx = LlvmContext::create();
    let mut ctx = Context::new(&llcx, "test_mod");
    let err = ctx.generate(&program).unwrap_err();
    assert!(matches!(err, sood_codegen::CodegenError::UnknownIdentifier(name) if name == "outer"));
}

#[test]
fn unknown_identifier_errors_instead_of_silent_placeholder() {
    let program = sood_syntax::parse_program("write missing;").expect("parse");
    let llcx = LlvmContext::create();
    let mut ctx = Context::new(&llcx, "test_mod");
    let err = ctx.generate(&program).unwrap_err();
    assert!(matches!(err, sood_codegen::CodegenError::UnknownIdentifier(name) if name == "missing"));
}

#[test]
fn read_statement_is_unimplemented() {
    let program = sood_syntax::parse_program("read x;").expect("parse");
    let llcx = LlvmContext::create();
    let mut ctx = Context::new(&llcx, "test_mod");
    let err = ctx.generate(&program).unwrap_err();
    assert!(matches!(err, sood_codegen::CodegenError::Unimplemented(feature) if feature == "read"));
}
