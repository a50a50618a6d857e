//! Runtime values produced by expression evaluation.
//!
//! The [`Value`] enum covers the four shapes an evaluated expression can
//! take: numbers (always `f64`), strings, booleans, and the distinguished
//! `None` value that stands in for missing data.

use std::cmp::Ordering;
use std::fmt;

/// An evaluated expression value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric value. All numbers are 64-bit floats.
    Number(f64),
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// The missing-value literal.
    None,
}

impl Value {
    /// Returns `true` if this is the `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Truthiness of the value: `None`, `False`, `0`, and `""` are false,
    /// everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }

    /// The type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::None => "None",
        }
    }

    /// Rank used to order values of different types.
    ///
    /// `None` sorts before everything, then booleans, numbers, strings.
    fn type_rank(&self) -> u8 {
        match self {
            Value::None => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::Str(_) => 3,
        }
    }

    /// Equality across values. Values of different types are never equal.
    pub fn eq_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            _ => false,
        }
    }

    /// Total ordering across values, with mixed types ordered by type rank.
    ///
    /// Returns `None` only when comparing two numbers where at least one is
    /// an IEEE NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::None, Value::None) => Some(Ordering::Equal),
            _ => Some(self.type_rank().cmp(&other.type_rank())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::None => write!(f, "None"),
        }
    }
}
