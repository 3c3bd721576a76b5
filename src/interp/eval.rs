//! Tree-walking interpreter for the AST

use crate::ast::Node;
use crate::diagnostics::{Error, Result};
use crate::lexer::{self, Token, TokenKind, TokenValue};
use crate::parser;

use super::env::Environment;
use super::host::Host;
use super::value::{self, BinaryOp, UnaryOp, Value};

/// Tree-walking interpreter
///
/// Borrows the environment rather than owning it: `load` and `exec` run
/// their nested programs through the same interpreter, so every level of
/// nesting reads and writes the same frames.
pub struct Interpreter<'a> {
    /// Variable environment
    env: &'a mut Environment,
    /// Output and file access
    host: &'a mut dyn Host,
}

impl<'a> Interpreter<'a> {
    /// Create a new interpreter
    pub fn new(env: &'a mut Environment, host: &'a mut dyn Host) -> Self {
        Interpreter { env, host }
    }

    /// Lex, parse and evaluate a program against the shared environment
    pub fn run(&mut self, source: &str) -> Result<Value> {
        let tokens = lexer::lex(source)?;
        let ast = parser::parse(&tokens)?;
        self.eval(&ast)
    }

    /// Evaluate a node, returning `Value::Nil` for statements
    pub fn eval(&mut self, node: &Node) -> Result<Value> {
        match node {
            Node::Scope(stmts) => {
                self.eval_scope(stmts)?;
                Ok(Value::Nil)
            }

            Node::Declaration { name, init } => {
                let name = ident(name)?;
                self.env.declare(name);
                if let Some(init) = init {
                    let val = self.eval(init)?;
                    self.env.write(name, val)?;
                }
                Ok(Value::Nil)
            }

            Node::If { cond, body } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(body)?;
                }
                Ok(Value::Nil)
            }

            Node::While { cond, body } => {
                while self.eval(cond)?.is_truthy() {
                    self.eval(body)?;
                }
                Ok(Value::Nil)
            }

            Node::Print(expr) => {
                let val = self.eval(expr)?;
                self.host.print(&val.to_string()).map_err(|e| Error::Output {
                    reason: e.to_string(),
                    line: expr.line(),
                })?;
                Ok(Value::Nil)
            }

            Node::Load(expr) => {
                let path = self.eval_string("load", expr)?;
                tracing::info!("Loading {:?}", path);
                let source = self.host.load(&path).map_err(|e| {
                    tracing::debug!("load of {:?} failed: {}", path, e);
                    Error::FileCouldNotBeLoaded { name: path.clone() }
                })?;
                self.run(&source)
            }

            Node::Exec(expr) => {
                let source = self.eval_string("exec", expr)?;
                tracing::info!("Executing {} bytes", source.len());
                self.run(&source)
            }

            Node::Assign { name, value } => {
                let val = self.eval(value)?;
                self.env.write(ident(name)?, val)?;
                Ok(Value::Nil)
            }

            Node::Binary { op, left, right } => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                let bin_op = BinaryOp::from_token(op.kind)
                    .ok_or_else(|| malformed("binary operator", op))?;
                value::binary(bin_op, lhs, rhs, op.line)
            }

            Node::Unary { op, operand } => {
                let val = self.eval(operand)?;
                let un_op =
                    UnaryOp::from_token(op.kind).ok_or_else(|| malformed("unary operator", op))?;
                value::unary(un_op, val, op.line)
            }

            Node::Literal(token) => self.eval_literal(token),
        }
    }

    /// Run statements in a fresh frame; the frame is popped even on error
    fn eval_scope(&mut self, stmts: &[Node]) -> Result<()> {
        self.env.push();
        let result = stmts.iter().try_for_each(|stmt| self.eval(stmt).map(drop));
        self.env.pop();
        result
    }

    fn eval_string(&mut self, stmt: &'static str, expr: &Node) -> Result<String> {
        match self.eval(expr)? {
            Value::Str(s) => Ok(s),
            other => Err(Error::ExpectedString {
                stmt,
                found: other.type_name(),
                line: expr.line(),
            }),
        }
    }

    fn eval_literal(&self, token: &Token) -> Result<Value> {
        match (token.kind, &token.value) {
            (TokenKind::IntLit, Some(TokenValue::Int(n))) => Ok(Value::Int(*n)),
            (TokenKind::StringLit, Some(TokenValue::Str(s))) => Ok(Value::Str(s.clone())),
            (TokenKind::True, _) => Ok(Value::Bool(true)),
            (TokenKind::False, _) => Ok(Value::Bool(false)),
            (TokenKind::Ident, _) => self.env.read(ident(token)?),
            _ => Err(malformed("literal", token)),
        }
    }
}

fn ident(token: &Token) -> Result<&str> {
    token.name().ok_or_else(|| malformed("identifier", token))
}

/// A token in a position the parser never puts it, e.g. in a hand-built AST
fn malformed(expected: &str, token: &Token) -> Error {
    Error::Parse {
        expected: expected.to_string(),
        found: format!("`{}`", token),
        line: token.line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::CaptureHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scope_frame_is_popped_after_error() {
        let mut env = Environment::new();
        let mut host = CaptureHost::new();
        let mut interp = Interpreter::new(&mut env, &mut host);

        let err = interp.run("{ let a = 1; b = 2; }").unwrap_err();
        assert_eq!(err, Error::name_not_found("b"));
        assert_eq!(env.depth(), 1);
    }

    /// Host whose output channel is closed
    struct ClosedOutput;

    impl Host for ClosedOutput {
        fn print(&mut self, _text: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn load(&mut self, path: &str) -> std::io::Result<String> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
        }
    }

    #[test]
    fn test_print_failure_stops_evaluation() {
        let mut env = Environment::new();
        let mut host = ClosedOutput;
        let mut interp = Interpreter::new(&mut env, &mut host);

        let err = interp.run("let x = 1;\nprint x; x = 2;").unwrap_err();
        assert_eq!(
            err,
            Error::Output {
                reason: "pipe closed".into(),
                line: 2,
            }
        );
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn test_hand_built_literal_with_operator_token_is_rejected() {
        let mut env = Environment::new();
        let mut host = CaptureHost::new();
        let mut interp = Interpreter::new(&mut env, &mut host);

        let node = Node::Literal(Token::new(TokenKind::Plus, 3, None));
        assert!(matches!(interp.eval(&node), Err(Error::Parse { line: 3, .. })));
    }
}
