//! Lexer for scrawl
//!
//! Turns program text into a token sequence that always ends in exactly one
//! `Eof` token.

mod tokens;

pub use tokens::{LineTracker, Token, TokenKind, TokenValue};

use logos::Logos;

use crate::diagnostics::{Error, Result};

/// Lex a source string into tokens
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let mut lexer = TokenKind::lexer_with_extras(source, LineTracker::default());
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let line = lexer.extras.line;
        let text = lexer.slice();

        let kind = kind.map_err(|()| Error::Lex {
            text: text.to_string(),
            reason: "unrecognized character".into(),
            line,
        })?;

        let value = match kind {
            TokenKind::IntLit => {
                let n = text.parse::<i64>().map_err(|_| Error::Lex {
                    text: text.to_string(),
                    reason: "integer literal out of range".into(),
                    line,
                })?;
                Some(TokenValue::Int(n))
            }
            TokenKind::StringLit => {
                if text.len() < 2 || !text.ends_with('"') {
                    return Err(Error::Lex {
                        text: text.to_string(),
                        reason: "unterminated string literal".into(),
                        line,
                    });
                }
                // Strings may span lines
                lexer.extras.line += text.matches('\n').count();
                Some(TokenValue::Str(text[1..text.len() - 1].to_string()))
            }
            TokenKind::Ident => Some(TokenValue::Str(text.to_string())),
            _ => None,
        };

        tokens.push(Token::new(kind, line, value));
    }

    tokens.push(Token::new(TokenKind::Eof, lexer.extras.line, None));
    tracing::debug!("Lexed {} tokens", tokens.len());
    Ok(tokens)
}
