//! Token definitions for the scrawl lexer

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token with its kind, source line and literal payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub value: Option<TokenValue>,
}

/// Literal payload carried by `IntLit`, `StringLit` and `Ident` tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenValue {
    Int(i64),
    Str(String),
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, value: Option<TokenValue>) -> Self {
        Self { kind, line, value }
    }

    /// Name carried by an identifier token
    pub fn name(&self) -> Option<&str> {
        match (&self.kind, &self.value) {
            (TokenKind::Ident, Some(TokenValue::Str(name))) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(TokenValue::Int(n)) => write!(f, "{}", n),
            Some(TokenValue::Str(s)) if self.kind == TokenKind::StringLit => {
                write!(f, "\"{}\"", s)
            }
            Some(TokenValue::Str(s)) => write!(f, "{}", s),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Line counter threaded through the logos lexer
#[derive(Debug, Clone, Copy)]
pub struct LineTracker {
    pub line: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self { line: 1 }
    }
}

fn newline(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    lex.extras.line += 1;
    logos::Skip
}

/// Token kinds recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Serialize, Deserialize)]
#[logos(extras = LineTracker)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    #[regex(r"\n", newline)]
    Newline,

    // Keywords
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("while")]
    While,
    #[token("print")]
    Print,
    #[token("load")]
    Load,
    #[token("exec")]
    Exec,
    /// Reserved; no statement or expression consumes it
    #[token("read")]
    Read,

    // Boolean literals
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Literals
    #[regex(r"[0-9]+")]
    IntLit,
    /// Also matches a string with no closing quote, which the lexer rejects
    #[regex(r#""[^"]*"?"#)]
    StringLit,

    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Ident,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // Compound operators
    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Punctuation
    #[token(";")]
    Semi,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Load
                | TokenKind::Exec
                | TokenKind::Read
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLit
                | TokenKind::StringLit
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Ident
        )
    }

    /// Check if this token is an operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Bang
                | TokenKind::Eq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::EqEq
                | TokenKind::Ne
                | TokenKind::Le
                | TokenKind::Ge
        )
    }

    /// Get the string representation of the token
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Newline => "<newline>",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::While => "while",
            TokenKind::Print => "print",
            TokenKind::Load => "load",
            TokenKind::Exec => "exec",
            TokenKind::Read => "read",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::IntLit => "<int>",
            TokenKind::StringLit => "<string>",
            TokenKind::Ident => "<ident>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::Eq => "=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::EqEq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semi => ";",
            TokenKind::Eof => "<eof>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
