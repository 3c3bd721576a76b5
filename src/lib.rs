//! scrawl: a small scripting language
//!
//! Variables, arithmetic and comparisons, `if`/`while`, `print`, and two
//! reflective statements: `load` runs a file and `exec` runs a string, both
//! against the caller's environment.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter(Environment, Host)
//!                                   ↑            │
//!                                   └── load / exec re-enter with new source
//! ```
//!
//! # Example
//!
//! ```text
//! let i = 0;
//! while (i < 3) {
//!     print "i = " + i;
//!     i = i + 1;
//! }
//! exec "print " + i + ";";
//! ```

pub mod ast;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-export diagnostics for convenience
pub use diagnostics::{Error, Result};

// Re-exports for convenience
pub use ast::Node;
pub use interp::{Environment, Interpreter, Value};

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse source code to AST
pub fn parse(source: &str) -> Result<Node> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}

/// Interpret source code against `env`, printing to stdout and loading from
/// the filesystem
pub fn interpret(source: &str, env: &mut Environment) -> Result<Value> {
    let mut host = interp::StdHost;
    Interpreter::new(env, &mut host).run(source)
}
