//! Pretty-printer.
//!
//! Recursive, indentation-aware, two-space indent per level. Depth is
//! threaded explicitly through every call — no global or thread-local
//! indentation counter. The printer never mutates the tree it walks.

use crate::expr::Expr;
use crate::stmt::{ElseBranch, Stmt};

const INDENT_WIDTH: usize = 2;

fn indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_WIDTH)
}

/// Print an AST root block (the top-level program) to a diagnostic string.
#[must_use]
pub fn print_program(stmts: &[Stmt]) -> String {
    print_block(stmts, 0)
}

fn print_block(stmts: &[Stmt], depth: usize) -> String {
    let mut out = format!("{}block {{\n", indent(depth));
    for stmt in stmts {
        out.push_str(&print_stmt(stmt, depth + 1));
        out.push('\n');
    }
    out.push_str(&indent(depth));
    out.push('}');
    out
}

fn print_expr(expr: &Expr, depth: usize) -> String {
    match expr {
        Expr::IntegerLiteral(v) => format!("int({v})"),
        Expr::FloatLiteral(v) => format!("float({v})"),
        Expr::StringLiteral(v) => format!("str({v})"),
        Expr::Identifier(name) => format!("ident({name})"),
        Expr::UnaryExpr { op, operand } => {
            format!(
                "unary_expression {{ op: {op}, exp: {} }}",
                print_expr(operand, depth)
            )
        }
        Expr::BinaryExpr { op, lhs, rhs } => {
            format!(
                "binary_expression {{ lhs: {}, op: {op}, rhs: {} }}",
                print_expr(lhs, depth),
                print_expr(rhs, depth)
            )
        }
        Expr::FunctionCall { callee, args } => {
            if args.is_empty() {
                format!("func_call {{ func: {callee} }}")
            } else {
                let rendered: Vec<String> =
                    args.iter().map(|a| print_expr(a, depth + 1)).collect();
                format!(
                    "func_call {{ func: {callee}, args: {{ {} }} }}",
                    rendered.join(", ")
                )
            }
        }
        Expr::Block(stmts) => print_block(stmts, depth),
        Expr::Assignment { target, value } => {
            format!(
                "assignment {{ lhs: {target}, rhs: {} }}",
                print_expr(value, depth + 1)
            )
        }
    }
}

fn print_stmt(stmt: &Stmt, depth: usize) -> String {
    let pad = indent(depth);
    match stmt {
        Stmt::VariableDecl {
            type_name,
            name,
            init,
        } => match init {
            Some(expr) => format!(
                "{pad}var_decl {{ type: {type_name}, lhs: {name}, rhs: {} }}",
                print_expr(expr, depth + 1)
            ),
            None => format!("{pad}var_decl {{ type: {type_name}, lhs: {name} }}"),
        },
        Stmt::FunctionDecl {
            return_type,
            name,
            params,
            body,
        } => {
            let mut out = format!("{pad}func_decl {{ type: {return_type}, name: {name}, ");
            if !params.is_empty() {
                out.push_str("args: { ");
                let rendered: Vec<String> = params
                    .iter()
                    .map(|p| format!("{}: {}", p.type_name, p.name))
                    .collect();
                out.push_str(&rendered.join(", "));
                out.push_str(" }, ");
            }
            out.push('\n');
            out.push_str(&print_block(body, depth + 1));
            out.push('\n');
            out.push_str(&pad);
            out.push('}');
            out
        }
        Stmt::Return(expr) => format!("{pad}ret({})", print_expr(expr, depth)),
        Stmt::ExpressionStatement(expr) => format!("{pad}{}", print_expr(expr, depth)),
        Stmt::If {
            cond,
            then_block,
            else_branch,
        } => {
            let mut out = format!(
                "{pad}if {{ cond: {}, then: {}",
                print_expr(cond, depth),
                print_block(then_block, depth + 1).trim_start()
            );
            if let Some(branch) = else_branch {
                out.push_str(", else: ");
                match branch.as_ref() {
                    ElseBranch::ElseIf(inner) => out.push_str(print_stmt(inner, 0).trim_start()),
                    ElseBranch::Else(stmts) => {
                        out.push_str(print_block(stmts, depth + 1).trim_start());
                    }
                }
            }
            out.push_str(" }");
            out
        }
        Stmt::While { cond, body } => format!(
            "{pad}while {{ cond: {}, body: {} }}",
            print_expr(cond, depth),
            print_block(body, depth + 1).trim_start()
        ),
        Stmt::Until { cond, body } => format!(
            "{pad}until {{ cond: {}, body: {} }}",
            print_expr(cond, depth),
            print_block(body, depth + 1).trim_start()
        ),
        Stmt::Write { value, sink } => match sink {
            Some(sink_expr) => format!(
                "{pad}write {{ value: {}, sink: {} }}",
                print_expr(value, depth),
                print_expr(sink_expr, depth)
            ),
            None => format!("{pad}write {{ value: {} }}", print_expr(value, depth)),
        },
        Stmt::Read { target } => format!("{pad}read({target})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::BinaryOp;

    #[test]
    fn printing_is_pure_and_deterministic() {
        let prog = vec![Stmt::VariableDecl {
            type_name: "integer".to_string(),
            name: "x".to_string(),
            init: Some(Expr::IntegerLiteral(42)),
        }];
        let first = print_program(&prog);
        let second = print_program(&prog);
        assert_eq!(first, second);
        assert!(first.contains("int(42)"));
    }

    #[test]
    fn binary_expression_format() {
        let expr = Expr::BinaryExpr {
            op: BinaryOp::Add,
            lhs: Box::new(Expr::IntegerLiteral(1)),
            rhs: Box::new(Expr::IntegerLiteral(2)),
        };
        assert_eq!(
            print_expr(&expr, 0),
            "binary_expression { lhs: int(1), op: +, rhs: int(2) }"
        );
    }
}
