//! slogfilt-expr - Small sandboxed expression evaluator for row filters.
//!
//! This crate evaluates the boolean-valued expressions that `slogfilt`
//! builds by substituting column values into a query template. The language
//! is deliberately narrow: arithmetic, comparisons (with chaining), the
//! boolean connectives `and`/`or`/`not`, parentheses, quoted strings, and
//! the literals `None`, `True`, and `False`.
//!
//! # Quick Start
//!
//! ```rust
//! use slogfilt_expr::eval_truthy;
//!
//! assert!(eval_truthy("5 > 3").unwrap());
//! assert!(eval_truthy("1 < 2 < 3 and not None").unwrap());
//! assert!(!eval_truthy("None != None").unwrap());
//! ```
//!
//! # Semantics
//!
//! - All numbers are `f64`; values substituted as bare numeric tokens
//!   compare arithmetically without any type declarations.
//! - `None` is the missing-value literal. It equals only itself and orders
//!   before every other value.
//! - `and`/`or` short-circuit and return an operand, not a boolean; apply
//!   [`Value::is_truthy`] (or use [`eval_truthy`]) for a yes/no answer.
//! - A bare name that is not `None`/`True`/`False` parses but fails at
//!   evaluation with [`ExprError::UnknownName`].

mod error;
mod eval;
mod parser;
mod token;
mod value;

pub use error::{ExprError, Result};
pub use eval::eval;
pub use parser::{ArithOp, CmpOp, Expr};
pub use value::Value;

/// Parses and evaluates an expression in one step.
pub fn eval_str(input: &str) -> Result<Value> {
    eval(&Expr::parse(input)?)
}

/// Parses and evaluates an expression, reducing the result to truthiness.
pub fn eval_truthy(input: &str) -> Result<bool> {
    Ok(eval_str(input)?.is_truthy())
}
