//! Error types for the expression crate.

use thiserror::Error;

/// Errors that can occur while lexing, parsing, or evaluating an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string literal starting at position {pos}")]
    UnterminatedString { pos: usize },

    /// The token stream did not match the grammar.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A bare name that is not a recognized literal.
    ///
    /// Column values are substituted as raw tokens, so this usually means a
    /// non-numeric value ended up in a position where a value was expected.
    #[error("unknown name '{0}'")]
    UnknownName(String),

    /// Operator applied to operand types it does not support.
    #[error("unsupported operand types: {lhs} {op} {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// Unary minus applied to a non-number.
    #[error("bad operand type for unary -: {0}")]
    BadUnaryOperand(&'static str),
}

/// Result type for expression operations.
pub type Result<T> = std::result::Result<T, ExprError>;
