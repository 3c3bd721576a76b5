//! Abstract Syntax Tree for scrawl
//!
//! This module defines the AST produced by the parser. Every node owns its
//! children, so a parsed program is a strict tree that the interpreter only
//! ever reads.

use crate::lexer::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// `{ stmt* }`, or a whole program with zero or several statements
    Scope(Vec<Node>),
    /// `let name (= init)?;`
    Declaration { name: Token, init: Option<Box<Node>> },
    /// `if (cond) { ... }`
    If { cond: Box<Node>, body: Box<Node> },
    /// `while (cond) { ... }`
    While { cond: Box<Node>, body: Box<Node> },
    Print(Box<Node>),
    Load(Box<Node>),
    Exec(Box<Node>),
    /// `name = value;`, the target is always an identifier token
    Assign { name: Token, value: Box<Node> },
    Binary {
        op: Token,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary { op: Token, operand: Box<Node> },
    /// Number, string, boolean or identifier
    Literal(Token),
}

impl Node {
    /// Get a short name for the node kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Scope(_) => "scope",
            Node::Declaration { .. } => "declaration",
            Node::If { .. } => "if",
            Node::While { .. } => "while",
            Node::Print(_) => "print",
            Node::Load(_) => "load",
            Node::Exec(_) => "exec",
            Node::Assign { .. } => "assign",
            Node::Binary { .. } => "binary",
            Node::Unary { .. } => "unary",
            Node::Literal(_) => "literal",
        }
    }

    /// Source line of the first token in the node, 0 for an empty scope
    pub fn line(&self) -> usize {
        match self {
            Node::Scope(stmts) => stmts.first().map_or(0, Node::line),
            Node::Declaration { name, .. } | Node::Assign { name, .. } => name.line,
            Node::If { cond, .. } | Node::While { cond, .. } => cond.line(),
            Node::Print(expr) | Node::Load(expr) | Node::Exec(expr) => expr.line(),
            Node::Binary { left, .. } => left.line(),
            Node::Unary { op, .. } => op.line,
            Node::Literal(token) => token.line,
        }
    }

    /// Check if the node is a statement rather than an expression
    pub fn is_statement(&self) -> bool {
        !matches!(
            self,
            Node::Binary { .. } | Node::Unary { .. } | Node::Literal(_)
        )
    }

    fn fmt_stmt(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            Node::Scope(stmts) => {
                writeln!(f, "{}{{", pad)?;
                for stmt in stmts {
                    stmt.fmt_stmt(f, indent + 1)?;
                }
                writeln!(f, "{}}}", pad)
            }
            Node::Declaration { name, init } => match init {
                Some(init) => writeln!(f, "{}let {} = {};", pad, name, init),
                None => writeln!(f, "{}let {};", pad, name),
            },
            Node::If { cond, body } => {
                writeln!(f, "{}if ({})", pad, cond)?;
                body.fmt_stmt(f, indent)
            }
            Node::While { cond, body } => {
                writeln!(f, "{}while ({})", pad, cond)?;
                body.fmt_stmt(f, indent)
            }
            Node::Print(expr) => writeln!(f, "{}print {};", pad, expr),
            Node::Load(expr) => writeln!(f, "{}load {};", pad, expr),
            Node::Exec(expr) => writeln!(f, "{}exec {};", pad, expr),
            Node::Assign { name, value } => writeln!(f, "{}{} = {};", pad, name, value),
            expr => writeln!(f, "{}{};", pad, expr),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Binary { .. } | Node::Unary { .. } => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

/// Prints expressions inline and statements as source lines.
///
/// Nested operators are parenthesized, so parsing the printed text gives back
/// the same tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(token) => write!(f, "{}", token),
            Node::Unary { op, operand } => {
                write!(f, "{}", op.kind)?;
                operand.fmt_operand(f)
            }
            Node::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {} ", op.kind)?;
                right.fmt_operand(f)
            }
            stmt => stmt.fmt_stmt(f, 0),
        }
    }
}

/// Wraps a parsed program so it prints the way the parser reads it back
pub struct Program<'a>(pub &'a Node);

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            // A one-statement scope keeps its braces, it parses back as a block
            Node::Scope(stmts) if stmts.len() != 1 => {
                for stmt in stmts {
                    stmt.fmt_stmt(f, 0)?;
                }
                Ok(())
            }
            node => node.fmt_stmt(f, 0),
        }
    }
}
