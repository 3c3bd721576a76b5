//! Error taxonomy for every stage of the pipeline
//!
//! Lexing, parsing and evaluation all fail with [`Error`]. The variants carry
//! the source line they were raised on so the front end can render them as
//! miette reports.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Interpreter diagnostic
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    // === Lexer Errors ===
    #[error("Line {line}: {reason}: `{text}`")]
    #[diagnostic(code(lex::invalid_input))]
    Lex {
        text: String,
        reason: String,
        line: usize,
    },

    // === Parse Errors ===
    #[error("Line {line}: expected {expected}, found {found}")]
    #[diagnostic(code(parse::unexpected_token))]
    Parse {
        expected: String,
        found: String,
        line: usize,
    },

    // === Name Errors ===
    #[error("The name `{name}` was not found")]
    #[diagnostic(
        code(runtime::name_not_found),
        help("did you mean to declare this variable with `let`?")
    )]
    NameNotFound { name: String },

    #[error("The file `{name}` could not be loaded")]
    #[diagnostic(code(runtime::load_failed))]
    FileCouldNotBeLoaded { name: String },

    #[error("Line {line}: could not write output: {reason}")]
    #[diagnostic(code(runtime::output_failed))]
    Output { reason: String, line: usize },

    // === Value Errors ===
    #[error("Line {line}: unsupported operand types for `{op}`: {left} and {right}")]
    #[diagnostic(code(runtime::type_mismatch))]
    TypeMismatch {
        op: String,
        left: &'static str,
        right: &'static str,
        line: usize,
    },

    #[error("Line {line}: unsupported operand type for unary `{op}`: {found}")]
    #[diagnostic(code(runtime::type_mismatch))]
    BadOperand {
        op: String,
        found: &'static str,
        line: usize,
    },

    #[error("Line {line}: `{stmt}` expects a string, found {found}")]
    #[diagnostic(code(runtime::expected_string))]
    ExpectedString {
        stmt: &'static str,
        found: &'static str,
        line: usize,
    },

    #[error("Line {line}: division by zero")]
    #[diagnostic(code(runtime::division_by_zero))]
    DivisionByZero { line: usize },

    #[error("Line {line}: integer overflow in `{op}`")]
    #[diagnostic(
        code(runtime::overflow),
        help("integers are 64-bit; divide with `/` to work with reals instead")
    )]
    Overflow { op: String, line: usize },
}

impl Error {
    pub fn name_not_found(name: impl Into<String>) -> Self {
        Error::NameNotFound { name: name.into() }
    }

    /// Stage that raised the error, used in log output
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Lex { .. } => "lex",
            Error::Parse { .. } => "parse",
            Error::NameNotFound { .. }
            | Error::FileCouldNotBeLoaded { .. }
            | Error::Output { .. }
            | Error::TypeMismatch { .. }
            | Error::BadOperand { .. }
            | Error::ExpectedString { .. }
            | Error::DivisionByZero { .. }
            | Error::Overflow { .. } => "runtime",
        }
    }
}
