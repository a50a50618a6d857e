//! Recursive-descent parser for the expression language.
//!
//! Precedence, lowest to highest: `or`, `and`, `not`, comparison chains,
//! additive, multiplicative, unary minus. Comparisons chain the way the
//! queries this language replaces were written: `a < b < c` holds when both
//! adjacent comparisons hold.

use crate::error::{ExprError, Result};
use crate::token::{tokenize, Token};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CmpOp {
    /// The operator's source spelling, for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtEq => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtEq => ">=",
        }
    }
}

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    /// The operator's source spelling, for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// String literal.
    Str(String),
    /// `True` or `False`.
    Bool(bool),
    /// The `None` literal.
    None,
    /// A bare name. Parses fine, fails at evaluation.
    Name(String),
    /// `not <expr>`.
    Not(Box<Expr>),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Short-circuit `and`.
    And(Box<Expr>, Box<Expr>),
    /// Short-circuit `or`.
    Or(Box<Expr>, Box<Expr>),
    /// A comparison chain: `first op1 e1 op2 e2 ...`.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CmpOp, Expr)>,
    },
    /// Binary arithmetic.
    Arith {
        op: ArithOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Parses an expression from source text.
    pub fn parse(input: &str) -> Result<Expr> {
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.or_expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(tok) => Err(ExprError::Syntax(format!(
                "unexpected trailing token {:?}",
                tok
            ))),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consumes the next token if it is the given keyword identifier.
    fn eat_keyword(&mut self, kw: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(name)) if name == kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.and_expr()?;
        while self.eat_keyword("or") {
            let rhs = self.and_expr()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.not_expr()?;
        while self.eat_keyword("and") {
            let rhs = self.not_expr()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Expr> {
        if self.eat_keyword("not") {
            let operand = self.not_expr()?;
            Ok(Expr::Not(Box::new(operand)))
        } else {
            self.comparison()
        }
    }

    fn comparison(&mut self) -> Result<Expr> {
        let first = self.additive()?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek_cmp_op() {
            self.pos += 1;
            let operand = self.additive()?;
            rest.push((op, operand));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn peek_cmp_op(&self) -> Option<CmpOp> {
        match self.peek() {
            Some(Token::EqEq) => Some(CmpOp::Eq),
            Some(Token::NotEq) => Some(CmpOp::Ne),
            Some(Token::Lt) => Some(CmpOp::Lt),
            Some(Token::LtEq) => Some(CmpOp::LtEq),
            Some(Token::Gt) => Some(CmpOp::Gt),
            Some(Token::GtEq) => Some(CmpOp::GtEq),
            _ => None,
        }
    }

    fn additive(&mut self) -> Result<Expr> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => ArithOp::Add,
                Some(Token::Minus) => ArithOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.multiplicative()?;
            lhs = Expr::Arith {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => ArithOp::Mul,
                Some(Token::Slash) => ArithOp::Div,
                Some(Token::Percent) => ArithOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Arith {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                let operand = self.unary()?;
                Ok(Expr::Neg(Box::new(operand)))
            }
            Some(Token::Plus) => {
                // Unary plus is a no-op on numbers; keep the operand.
                self.pos += 1;
                self.unary()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Str(s)) => Ok(Expr::Str(s)),
            Some(Token::Ident(name)) => Ok(match name.as_str() {
                "None" => Expr::None,
                "True" => Expr::Bool(true),
                "False" => Expr::Bool(false),
                _ => Expr::Name(name),
            }),
            Some(Token::LParen) => {
                let inner = self.or_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(tok) => Err(ExprError::Syntax(format!(
                        "expected ')', found {:?}",
                        tok
                    ))),
                    None => Err(ExprError::Syntax("expected ')', found end of input".into())),
                }
            }
            Some(tok) => Err(ExprError::Syntax(format!(
                "expected a value, found {:?}",
                tok
            ))),
            None => Err(ExprError::Syntax("unexpected end of expression".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_atoms() {
        assert_eq!(Expr::parse("5").unwrap(), Expr::Number(5.0));
        assert_eq!(Expr::parse("None").unwrap(), Expr::None);
        assert_eq!(Expr::parse("True").unwrap(), Expr::Bool(true));
        assert_eq!(Expr::parse("'x'").unwrap(), Expr::Str("x".to_string()));
    }

    #[test]
    fn bare_name_parses() {
        assert_eq!(
            Expr::parse("whatever").unwrap(),
            Expr::Name("whatever".to_string())
        );
    }

    #[test]
    fn comparison_chain_collects_operands() {
        let expr = Expr::parse("1 < 2 < 3").unwrap();
        match expr {
            Expr::Compare { rest, .. } => assert_eq!(rest.len(), 2),
            other => panic!("expected comparison chain, got {:?}", other),
        }
    }

    #[test]
    fn precedence_and_binds_tighter_than_or() {
        let expr = Expr::parse("1 or 2 and 3").unwrap();
        assert!(matches!(expr, Expr::Or(_, _)));
    }

    #[test]
    fn precedence_arithmetic_inside_comparison() {
        let expr = Expr::parse("1 + 2 * 3 > 6").unwrap();
        match expr {
            Expr::Compare { first, .. } => {
                assert!(matches!(*first, Expr::Arith { op: ArithOp::Add, .. }))
            }
            other => panic!("expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn parenthesized_grouping() {
        let expr = Expr::parse("(1 or 2) and 3").unwrap();
        assert!(matches!(expr, Expr::And(_, _)));
    }

    #[test]
    fn double_negation() {
        let expr = Expr::parse("not not True").unwrap();
        assert!(matches!(expr, Expr::Not(_)));
    }

    #[test]
    fn empty_input_is_a_syntax_error() {
        assert!(matches!(Expr::parse(""), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn trailing_tokens_rejected() {
        assert!(matches!(Expr::parse("1 2"), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn unbalanced_parens_rejected() {
        assert!(matches!(Expr::parse("(1"), Err(ExprError::Syntax(_))));
        assert!(matches!(Expr::parse("1)"), Err(ExprError::Syntax(_))));
    }
}
