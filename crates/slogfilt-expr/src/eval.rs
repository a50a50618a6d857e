//! Tree-walking evaluator.
//!
//! `and`/`or` short-circuit and return an operand rather than a boolean, so
//! the final result of an expression may be any [`Value`]; callers that need
//! a yes/no answer apply [`Value::is_truthy`].

use std::cmp::Ordering;

use crate::error::{ExprError, Result};
use crate::parser::{ArithOp, CmpOp, Expr};
use crate::value::Value;

/// Evaluates a parsed expression.
pub fn eval(expr: &Expr) -> Result<Value> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::None => Ok(Value::None),
        Expr::Name(name) => Err(ExprError::UnknownName(name.clone())),

        Expr::Not(operand) => {
            let v = eval(operand)?;
            Ok(Value::Bool(!v.is_truthy()))
        }

        Expr::Neg(operand) => match eval(operand)? {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(ExprError::BadUnaryOperand(other.type_name())),
        },

        Expr::And(lhs, rhs) => {
            let left = eval(lhs)?;
            if left.is_truthy() {
                eval(rhs)
            } else {
                Ok(left)
            }
        }

        Expr::Or(lhs, rhs) => {
            let left = eval(lhs)?;
            if left.is_truthy() {
                Ok(left)
            } else {
                eval(rhs)
            }
        }

        Expr::Compare { first, rest } => {
            let mut lhs = eval(first)?;
            for (op, operand) in rest {
                let rhs = eval(operand)?;
                if !compare(*op, &lhs, &rhs) {
                    return Ok(Value::Bool(false));
                }
                lhs = rhs;
            }
            Ok(Value::Bool(true))
        }

        Expr::Arith { op, lhs, rhs } => {
            let left = eval(lhs)?;
            let right = eval(rhs)?;
            arith(*op, left, right)
        }
    }
}

fn compare(op: CmpOp, lhs: &Value, rhs: &Value) -> bool {
    match op {
        CmpOp::Eq => lhs.eq_value(rhs),
        CmpOp::Ne => !lhs.eq_value(rhs),
        // Unordered operands (NaN) fail every ordering comparison.
        CmpOp::Lt => lhs.compare(rhs) == Some(Ordering::Less),
        CmpOp::Gt => lhs.compare(rhs) == Some(Ordering::Greater),
        CmpOp::LtEq => matches!(
            lhs.compare(rhs),
            Some(Ordering::Less) | Some(Ordering::Equal)
        ),
        CmpOp::GtEq => matches!(
            lhs.compare(rhs),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ),
    }
}

fn arith(op: ArithOp, lhs: Value, rhs: Value) -> Result<Value> {
    match (op, &lhs, &rhs) {
        (_, Value::Number(a), Value::Number(b)) => {
            let a = *a;
            let b = *b;
            let n = match op {
                ArithOp::Add => a + b,
                ArithOp::Sub => a - b,
                ArithOp::Mul => a * b,
                ArithOp::Div => a / b,
                // Floored modulo: the result takes the divisor's sign.
                ArithOp::Mod => a - b * (a / b).floor(),
            };
            Ok(Value::Number(n))
        }
        (ArithOp::Add, Value::Str(a), Value::Str(b)) => {
            let mut s = a.clone();
            s.push_str(b);
            Ok(Value::Str(s))
        }
        _ => Err(ExprError::TypeMismatch {
            op: op.symbol(),
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        }),
    }
}
