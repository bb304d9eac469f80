//! Recursive-descent parser producing `sood_ast` trees.
//!
//! Grammar (informal, see SPEC_FULL.md §3 "Surface grammar"):
//!
//! ```text
//! program    := stmt* EOF
//! stmt       := decl | if_stmt | while_stmt | until_stmt | write_stmt
//!             | read_stmt | return_stmt | expr_stmt
//! decl       := type_name ident ( '(' params ')' block | ('=' expr)? ';' )
//! if_stmt    := "if" expr block ("else" (if_stmt | block))?
//! while_stmt := "while" expr block
//! until_stmt := "until" expr block
//! write_stmt := "write" expr ("to" expr)? ';'
//! read_stmt  := "read" ident ';'
//! return_stmt:= "return" expr ';'
//! expr_stmt  := (ident '=' expr | expr) ';'
//! block      := '{' stmt* '}'
//! ```
//!
//! Expression precedence, loosest to tightest: `alternatively` (or),
//! `also` (and), equality, relational, additive, multiplicative, unary,
//! primary.

use sood_ast::{BinaryOp, ElseBranch, Expr, Param, Stmt, UnaryOp};

use crate::error::ParseError;
use crate::lexer::{lex, Token, TokenKind};

pub fn parse_program(src: &str) -> Result<Vec<Stmt>, ParseError> {
    let tokens = lex(src)?;
    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();
    while !parser.at_eof() {
        stmts.push(parser.parse_stmt()?);
        parser.skip_semicolons();
    }
    Ok(stmts)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn skip_semicolons(&mut self) {
        while matches!(self.peek().kind, TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{kind:?}"),
                found: format!("{:?}", self.peek().kind),
                offset: self.peek().offset,
            })
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.advance().kind {
            TokenKind::Ident(name) => Ok(name),
            other => Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: format!("{other:?}"),
                offset: self.peek().offset,
            }),
        }
    }

    fn type_name(&mut self) -> Option<&'static str> {
        let name = match self.peek().kind {
            TokenKind::KwInteger => "integer",
            TokenKind::KwFloat => "float",
            TokenKind::KwString => "string",
            _ => return None,
        };
        self.advance();
        Some(name)
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !matches!(self.peek().kind, TokenKind::RBrace | TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
            self.skip_semicolons();
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match &self.peek().kind {
            TokenKind::KwInteger | TokenKind::KwFloat | TokenKind::KwString => {
                self.parse_decl_or_func()
            }
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwUntil => self.parse_until(),
            TokenKind::KwWrite => self.parse_write(),
            TokenKind::KwRead => self.parse_read(),
            TokenKind::KwReturn => self.parse_return(),
            _ => {
                let expr = self.parse_expr_or_assignment()?;
                Ok(Stmt::ExpressionStatement(expr))
            }
        }
    }

    fn parse_decl_or_func(&mut self) -> Result<Stmt, ParseError> {
        let type_name = self
            .type_name()
            .ok_or_else(|| ParseError::UnexpectedToken {
                expected: "type keyword".to_string(),
                found: format!("{:?}", self.peek().kind),
                offset: self.peek().offset,
            })?
            .to_string();
        let name = self.expect_ident()?;

        if matches!(self.peek().kind, TokenKind::LParen) {
            self.advance();
            let mut params = Vec::new();
            while !matches!(self.peek().kind, TokenKind::RParen) {
                let param_type = self.type_name().ok_or_else(|| ParseError::UnexpectedToken {
                    expected: "parameter type".to_string(),
                    found: format!("{:?}", self.peek().kind),
                    offset: self.peek().offset,
                })?;
                let param_name = self.expect_ident()?;
                params.push(Param {
                    type_name: param_type.to_string(),
                    name: param_name,
                });
                if matches!(self.peek().kind, TokenKind::Comma) {
                    self.advance();
                }
            }
            self.expect(&TokenKind::RParen)?;
            let body = self.parse_block()?;
            return Ok(Stmt::FunctionDecl {
                return_type: type_name,
                name,
                params,
                body,
            });
        }

        let init = if matches!(self.peek().kind, TokenKind::Assign) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::VariableDecl {
            type_name,
            name,
            init,
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_branch = if matches!(self.peek().kind, TokenKind::KwElse) {
            self.advance();
            if matches!(self.peek().kind, TokenKind::KwIf) {
                Some(Box::new(ElseBranch::ElseIf(self.parse_if()?)))
            } else {
                Some(Box::new(ElseBranch::Else(self.parse_block()?)))
            }
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_block,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_until(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::Until { cond, body })
    }

    fn parse_write(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let value = self.parse_expr()?;
        let sink = if matches!(self.peek().kind, TokenKind::KwTo) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::Write { value, sink })
    }

    fn parse_read(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let target = self.expect_ident()?;
        Ok(Stmt::Read { target })
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let expr = self.parse_expr()?;
        Ok(Stmt::Return(expr))
    }

    /// Statement-level expression: `ident '=' expr` is an assignment,
    /// anything else falls through to the general expression grammar.
    fn parse_expr_or_assignment(&mut self) -> Result<Expr, ParseError> {
        if let TokenKind::Ident(name) = self.peek().kind.clone() {
            if matches!(self.tokens[self.pos + 1].kind, TokenKind::Assign) {
                self.advance();
                self.advance();
                let value = self.parse_expr()?;
                return Ok(Expr::Assignment {
                    target: name,
                    value: Box::new(value),
                });
            }
        }
        self.parse_expr()
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek().kind, TokenKind::KwAlternatively) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::BinaryExpr {
                op: BinaryOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_equality()?;
        while matches!(self.peek().kind, TokenKind::KwAlso) {
            self.advance();
            let rhs = self.parse_equality()?;
            lhs = Expr::BinaryExpr {
                op: BinaryOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_relational()?;
            lhs = Expr::BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Le => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Ge => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = Expr::BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Bang => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::UnaryExpr {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                })
            }
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::UnaryExpr {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                })
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Integer(v) => Ok(Expr::IntegerLiteral(v)),
            TokenKind::Float(v) => Ok(Expr::FloatLiteral(v)),
            TokenKind::String(v) => Ok(Expr::StringLiteral(v)),
            TokenKind::Ident(name) => {
                if matches!(self.peek().kind, TokenKind::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    while !matches!(self.peek().kind, TokenKind::RParen) {
                        args.push(self.parse_expr()?);
                        if matches!(self.peek().kind, TokenKind::Comma) {
                            self.advance();
                        }
                    }
                    self.expect(&TokenKind::RParen)?;
                    Ok(Expr::FunctionCall { callee: name, args })
                } else {
                    Ok(Expr::Identifier(name))
                }
            }
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: format!("{other:?}"),
                offset: tok.offset,
            }),
        }
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_declaration_and_write() {
        let stmts = parse_program("integer x; x = 42; write x;").expect("parse");
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[0], Stmt::VariableDecl { .. }));
        assert!(matches!(stmts[1], Stmt::ExpressionStatement(Expr::Assignment { .. })));
        assert!(matches!(stmts[2], Stmt::Write { .. }));
    }

    #[test]
    fn parses_function_declaration() {
        let stmts =
            parse_program("integer add(integer a, integer b) { return a + b; }; write add(2, 3);")
                .expect("parse");
        assert_eq!(stmts.len(), 2);
        match &stmts[0] {
            Stmt::FunctionDecl { name, params, .. } => {
                assert_eq!(name, "add");
                assert_eq!(params.len(), 2);
            }
            other => panic!("expected FunctionDecl, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_else() {
        let stmts =
            parse_program("if 1 == 1 { write \"yes\"; } else { write \"no\"; };").expect("parse");
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Stmt::If { .. }));
    }

    #[test]
    fn parses_while_loop() {
        let stmts = parse_program(
            "integer i; i = 0; while i < 3 { write i; i = i + 1; };",
        )
        .expect("parse");
        assert!(matches!(stmts[2], Stmt::While { .. }));
    }
}
