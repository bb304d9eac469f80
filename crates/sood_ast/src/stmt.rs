//! Statement nodes.

use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub type_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VariableDecl {
        type_name: String,
        name: String,
        init: Option<Expr>,
    },
    FunctionDecl {
        return_type: String,
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
    },
    Return(Expr),
    ExpressionStatement(Expr),
    If {
        cond: Expr,
        then_block: Vec<Stmt>,
        /// The `else` branch, if present: either another `If` (else-if
        /// chain) or a plain block wrapped as `Else`.
        else_branch: Option<Box<ElseBranch>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Until {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Write {
        value: Expr,
        /// Sink expression; accepted by the grammar but ignored by lowering
        /// (writes always go to stdout) per spec.md §3.
        sink: Option<Expr>,
    },
    /// Reserved, never lowered — always `CodegenError::Unimplemented`.
    Read {
        target: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    ElseIf(Stmt),
    Else(Vec<Stmt>),
}
