//! Expression nodes.
//!
//! `Expr` is a sealed sum type (spec.md §9 prefers this over a visitor
//! interface): every lowering rule is a single exhaustive `match`.

use crate::ops::{BinaryOp, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLiteral(i64),
    FloatLiteral(f64),
    /// Raw text with surrounding quotes already stripped by the parser.
    /// Escape sequences (`\n`, `\r`, `\t`, `\\`) are decoded at lowering
    /// time, not at parse time.
    StringLiteral(String),
    Identifier(String),
    UnaryExpr {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    BinaryExpr {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    FunctionCall {
        callee: String,
        args: Vec<Expr>,
    },
    /// Ordered sequence of statements; also used as a function body.
    Block(Vec<Stmt>),
    Assignment {
        target: String,
        value: Box<Expr>,
    },
}

// `Stmt` lives in its own module but the `Block` variant above needs it;
// re-exported here so `Expr` and `Stmt` can reference each other freely.
use crate::stmt::Stmt;
