//! Hand-written lexer. Produces a flat token stream consumed by the parser.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Integer(i64),
    Float(f64),
    String(String),
    Ident(String),

    // Keywords
    KwInteger,
    KwFloat,
    KwString,
    KwIf,
    KwElse,
    KwWhile,
    KwUntil,
    KwWrite,
    KwRead,
    KwTo,
    KwReturn,
    KwAlso,
    KwAlternatively,

    // Symbols
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Assign,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

pub fn lex(src: &str) -> Result<Vec<Token>, ParseError> {
    let bytes: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '#' {
            while i < bytes.len() && bytes[i] != '\n' {
                i += 1;
            }
            continue;
        }

        let start = i;

        if c.is_ascii_digit() {
            let mut text = String::new();
            let mut is_float = false;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == '.') {
                if bytes[i] == '.' {
                    is_float = true;
                }
                text.push(bytes[i]);
                i += 1;
            }
            let kind = if is_float {
                TokenKind::Float(
                    text.parse()
                        .map_err(|_| ParseError::InvalidNumber(text.clone()))?,
                )
            } else {
                TokenKind::Integer(
                    text.parse()
                        .map_err(|_| ParseError::InvalidNumber(text.clone()))?,
                )
            };
            tokens.push(Token { kind, offset: start });
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut text = String::new();
            while i < bytes.len() && (bytes[i].is_alphanumeric() || bytes[i] == '_') {
                text.push(bytes[i]);
                i += 1;
            }
            let kind = match text.as_str() {
                "integer" => TokenKind::KwInteger,
                "float" => TokenKind::KwFloat,
                "string" => TokenKind::KwString,
                "if" => TokenKind::KwIf,
                "else" => TokenKind::KwElse,
                "while" => TokenKind::KwWhile,
                "until" => TokenKind::KwUntil,
                "write" => TokenKind::KwWrite,
                "read" => TokenKind::KwRead,
                "to" => TokenKind::KwTo,
                "return" => TokenKind::KwReturn,
                "also" => TokenKind::KwAlso,
                "alternatively" => TokenKind::KwAlternatively,
                _ => TokenKind::Ident(text),
            };
            tokens.push(Token { kind, offset: start });
            continue;
        }

        if c == '"' {
            i += 1;
            let mut text = String::new();
            let mut closed = false;
            while i < bytes.len() {
                if bytes[i] == '"' {
                    closed = true;
                    i += 1;
                    break;
                }
                if bytes[i] == '\\' && i + 1 < bytes.len() {
                    // Escape sequences are decoded at lowering time (spec.md
                    // §4.4); the lexer only needs to avoid treating an
                    // escaped quote as the closing delimiter.
                    text.push(bytes[i]);
                    text.push(bytes[i + 1]);
                    i += 2;
                    continue;
                }
                text.push(bytes[i]);
                i += 1;
            }
            if !closed {
                return Err(ParseError::UnterminatedString(start));
            }
            tokens.push(Token {
                kind: TokenKind::String(text),
                offset: start,
            });
            continue;
        }

        macro_rules! two_char {
            ($second:expr, $two:expr, $one:expr) => {{
                if i + 1 < bytes.len() && bytes[i + 1] == $second {
                    i += 2;
                    $two
                } else {
                    i += 1;
                    $one
                }
            }};
        }

        let kind = match c {
            '{' => {
                i += 1;
                TokenKind::LBrace
            }
            '}' => {
                i += 1;
                TokenKind::RBrace
            }
            '(' => {
                i += 1;
                TokenKind::LParen
            }
            ')' => {
                i += 1;
                TokenKind::RParen
            }
            ',' => {
                i += 1;
                TokenKind::Comma
            }
            ';' => {
                i += 1;
                TokenKind::Semicolon
            }
            '+' => {
                i += 1;
                TokenKind::Plus
            }
            '-' => {
                i += 1;
                TokenKind::Minus
            }
            '*' => {
                i += 1;
                TokenKind::Star
            }
            '/' => {
                i += 1;
                TokenKind::Slash
            }
            '%' => {
                i += 1;
                TokenKind::Percent
            }
            '=' => two_char!('=', TokenKind::EqEq, TokenKind::Assign),
            '!' => two_char!('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => two_char!('=', TokenKind::Le, TokenKind::Lt),
            '>' => two_char!('=', TokenKind::Ge, TokenKind::Gt),
            other => return Err(ParseError::UnexpectedChar(other, start)),
        };
        tokens.push(Token { kind, offset: start });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        offset: bytes.len(),
    });
    Ok(tokens)
}
