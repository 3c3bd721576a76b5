//! Tree-walking interpreter for the AST
//!
//! Evaluates parsed programs against a scoped environment.

pub mod env;
pub mod eval;
pub mod host;
pub mod value;

pub use env::Environment;
pub use eval::Interpreter;
pub use host::{CaptureHost, Host, StdHost};
pub use value::Value;
