//! Runtime values for the interpreter

use std::cmp::Ordering;
use std::fmt;

use crate::diagnostics::{Error, Result};
use crate::lexer::TokenKind;

/// Runtime value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value: the result of a statement, or a declared but unset variable
    #[default]
    Nil,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float, produced by `/`
    Real(f64),
    /// String
    Str(String),
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Str(_) => "string",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if value is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Real(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }

    /// Try to get as float
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // Debug keeps the trailing `.0` on integral reals
            Value::Real(n) => write!(f, "{:?}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Ints and reals compare numerically; other kinds are never equal to each other
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Int(a), Value::Real(b)) | (Value::Real(b), Value::Int(a)) => {
                cmp_int_real(*a, *b) == Some(Ordering::Equal)
            }
            _ => false,
        }
    }
}

/// Binary operator applied to two evaluated operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::Ne => BinaryOp::Ne,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Ge => BinaryOp::Ge,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

/// Unary operator applied to an evaluated operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    Plus,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Plus => Some(UnaryOp::Plus),
            _ => None,
        }
    }
}

fn mismatch(op: &str, lhs: &Value, rhs: &Value, line: usize) -> Error {
    Error::TypeMismatch {
        op: op.to_string(),
        left: lhs.type_name(),
        right: rhs.type_name(),
        line,
    }
}

fn overflow(op: BinaryOp, line: usize) -> Error {
    Error::Overflow {
        op: op.as_str().to_string(),
        line,
    }
}

/// Apply a binary operator; `line` is only used for error reporting
pub fn binary(op: BinaryOp, lhs: Value, rhs: Value, line: usize) -> Result<Value> {
    match op {
        BinaryOp::Add => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                a.checked_add(b).map(Value::Int).ok_or_else(|| overflow(op, line))
            }
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (Value::Str(a), Value::Int(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (Value::Int(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (lhs, rhs) => real_arith(op, &lhs, &rhs, line, |a, b| a + b),
        },
        BinaryOp::Sub => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                a.checked_sub(b).map(Value::Int).ok_or_else(|| overflow(op, line))
            }
            (lhs, rhs) => real_arith(op, &lhs, &rhs, line, |a, b| a - b),
        },
        BinaryOp::Mul => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                a.checked_mul(b).map(Value::Int).ok_or_else(|| overflow(op, line))
            }
            (lhs, rhs) => real_arith(op, &lhs, &rhs, line, |a, b| a * b),
        },
        BinaryOp::Div => match (lhs.as_real(), rhs.as_real()) {
            (Some(_), Some(b)) if b == 0.0 => Err(Error::DivisionByZero { line }),
            (Some(a), Some(b)) => Ok(Value::Real(a / b)),
            _ => Err(mismatch(op.as_str(), &lhs, &rhs, line)),
        },
        BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::Ne => Ok(Value::Bool(lhs != rhs)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(&lhs, &rhs).ok_or_else(|| mismatch(op.as_str(), &lhs, &rhs, line))?;
            let result = match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(Value::Bool(result))
        }
    }
}

/// Numeric fallback once the int/int and string cases are ruled out
fn real_arith(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
    line: usize,
    apply: impl Fn(f64, f64) -> f64,
) -> Result<Value> {
    match (lhs.as_real(), rhs.as_real()) {
        (Some(a), Some(b)) => Ok(Value::Real(apply(a, b))),
        _ => Err(mismatch(op.as_str(), lhs, rhs, line)),
    }
}

/// Ordering between two values, `None` if the kinds cannot be ordered.
/// NaN compares as unordered too.
fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Real(b)) => cmp_int_real(*a, *b),
        (Value::Real(a), Value::Int(b)) => cmp_int_real(*b, *a).map(Ordering::reverse),
        _ => None,
    }
}

/// Exact ordering of an int against a real, without rounding the int to `f64`
fn cmp_int_real(int: i64, real: f64) -> Option<Ordering> {
    // 2^63, the first real above every i64
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if real.is_nan() {
        return None;
    }
    if real >= BOUND {
        return Some(Ordering::Less);
    }
    if real < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = real.trunc();
    let by_whole = int.cmp(&(whole as i64));
    if by_whole != Ordering::Equal {
        return Some(by_whole);
    }
    let frac = real - whole;
    Some(if frac > 0.0 {
        Ordering::Less
    } else if frac < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

/// Apply a unary operator
pub fn unary(op: UnaryOp, val: Value, line: usize) -> Result<Value> {
    match op {
        UnaryOp::Neg => match val {
            Value::Int(n) => n.checked_neg().map(Value::Int).ok_or_else(|| Error::Overflow {
                op: "-".into(),
                line,
            }),
            Value::Real(f) => Ok(Value::Real(-f)),
            other => Err(Error::BadOperand {
                op: "-".into(),
                found: other.type_name(),
                line,
            }),
        },
        UnaryOp::Not => Ok(Value::Bool(!val.is_truthy())),
        UnaryOp::Plus => Ok(val),
    }
}
