//! Parser for scrawl
//!
//! A recursive descent parser that produces an AST from a token stream.
//! Each binary precedence level folds to the left, so `8 - 3 - 2` groups as
//! `(8 - 3) - 2` and `a < b < c` as `(a < b) < c`.

use crate::ast::Node;
use crate::diagnostics::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Parse a token stream into an AST
///
/// The stream must end in `Eof`. A program with exactly one statement yields
/// that statement; any other count yields a [`Node::Scope`].
pub fn parse(tokens: &[Token]) -> Result<Node> {
    let end = match tokens.last() {
        Some(end) if end.kind == TokenKind::Eof => end,
        last => {
            return Err(Error::Parse {
                expected: format!("`{}` at end of stream", TokenKind::Eof),
                found: last.map_or_else(|| "empty token stream".into(), |t| format!("`{}`", t)),
                line: last.map_or(0, |t| t.line),
            });
        }
    };
    let mut parser = Parser::new(tokens, end);
    parser.parse_program()
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Returned by `current` once the stream is exhausted
    end: &'a Token,
}

const EQUALITY_OPS: &[TokenKind] = &[TokenKind::EqEq, TokenKind::Ne];
const COMPARISON_OPS: &[TokenKind] = &[TokenKind::Lt, TokenKind::Le, TokenKind::Gt, TokenKind::Ge];
const ADDITIVE_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE_OPS: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash];
const UNARY_OPS: &[TokenKind] = &[TokenKind::Minus, TokenKind::Plus, TokenKind::Bang];

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], end: &'a Token) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(self.end)
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    fn advance(&mut self) -> &'a Token {
        let tok = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("`{}`", kind)))
        }
    }

    fn error(&self, expected: impl Into<String>) -> Error {
        let tok = self.current();
        Error::Parse {
            expected: expected.into(),
            found: format!("`{}`", tok),
            line: tok.line,
        }
    }

    // ==================== PROGRAM ====================

    fn parse_program(&mut self) -> Result<Node> {
        let mut stmts = Vec::new();
        while !self.at(TokenKind::Eof) {
            stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::Eof)?;

        if self.pos != self.tokens.len() {
            return Err(self.error("end of input after `<eof>`"));
        }

        tracing::debug!("Parsed {} statements", stmts.len());
        if stmts.len() == 1 {
            Ok(stmts.remove(0))
        } else {
            Ok(Node::Scope(stmts))
        }
    }

    // ==================== STATEMENTS ====================

    fn parse_statement(&mut self) -> Result<Node> {
        match self.peek() {
            TokenKind::Let => self.parse_let(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => {
                let (cond, body) = self.parse_conditional(TokenKind::If)?;
                Ok(Node::If { cond, body })
            }
            TokenKind::While => {
                let (cond, body) = self.parse_conditional(TokenKind::While)?;
                Ok(Node::While { cond, body })
            }
            TokenKind::Print => Ok(Node::Print(self.parse_keyword_stmt(TokenKind::Print)?)),
            TokenKind::Load => Ok(Node::Load(self.parse_keyword_stmt(TokenKind::Load)?)),
            TokenKind::Exec => Ok(Node::Exec(self.parse_keyword_stmt(TokenKind::Exec)?)),
            _ => {
                let stmt = self.parse_assignment()?;
                self.expect(TokenKind::Semi)?;
                Ok(stmt)
            }
        }
    }

    fn parse_let(&mut self) -> Result<Node> {
        self.expect(TokenKind::Let)?;
        let name = self.expect(TokenKind::Ident)?.clone();

        let init = if self.at(TokenKind::Eq) {
            self.advance();
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.expect(TokenKind::Semi)?;
        Ok(Node::Declaration { name, init })
    }

    fn parse_block(&mut self) -> Result<Node> {
        self.expect(TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            stmts.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Node::Scope(stmts))
    }

    /// `keyword ( expression ) block`, shared by `if` and `while`
    fn parse_conditional(&mut self, keyword: TokenKind) -> Result<(Box<Node>, Box<Node>)> {
        self.expect(keyword)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok((Box::new(cond), Box::new(body)))
    }

    /// `keyword expression ;`, shared by `print`, `load` and `exec`
    fn parse_keyword_stmt(&mut self, keyword: TokenKind) -> Result<Box<Node>> {
        self.expect(keyword)?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semi)?;
        Ok(Box::new(expr))
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expression(&mut self) -> Result<Node> {
        self.parse_equality()
    }

    fn parse_assignment(&mut self) -> Result<Node> {
        let target = self.parse_equality()?;
        if !self.at(TokenKind::Eq) {
            return Ok(target);
        }

        let eq = self.advance();
        let name = match target {
            Node::Literal(tok) if tok.kind == TokenKind::Ident => tok,
            other => {
                return Err(Error::Parse {
                    expected: "identifier as assignment target".into(),
                    found: format!("`{}`", other),
                    line: eq.line,
                });
            }
        };

        // The right side is not itself assignable, so `a = b = c` stops here
        let value = self.parse_equality()?;
        Ok(Node::Assign {
            name,
            value: Box::new(value),
        })
    }

    fn parse_equality(&mut self) -> Result<Node> {
        self.parse_binary_level(EQUALITY_OPS, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Node> {
        self.parse_binary_level(COMPARISON_OPS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Node> {
        self.parse_binary_level(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Node> {
        self.parse_binary_level(MULTIPLICATIVE_OPS, Self::parse_unary)
    }

    /// One left-associative precedence level: `next (op next)*`
    fn parse_binary_level(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> Result<Node>,
    ) -> Result<Node> {
        let mut left = next(self)?;

        while self.at_any(ops) {
            let op = self.advance().clone();
            let right = next(self)?;
            left = Node::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Node> {
        if self.at_any(UNARY_OPS) {
            let op = self.advance().clone();
            let operand = self.parse_unary()?;
            return Ok(Node::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node> {
        match self.peek() {
            TokenKind::IntLit
            | TokenKind::StringLit
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Ident => Ok(Node::Literal(self.advance().clone())),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error("expression")),
        }
    }
}
