//! Lexer for the expression language.
//!
//! Produces a flat token list in a single pass; the parser consumes the
//! list with one token of lookahead.

use crate::error::{ExprError, Result};

/// A single lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal.
    Number(f64),
    /// Quoted string literal (quotes stripped).
    Str(String),
    /// Bare name: keywords (`and`, `or`, `not`, `None`, `True`, `False`)
    /// and anything else that looks like an identifier.
    Ident(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
}

/// Tokenizes the input, returning the full token list.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\r' | '\n' => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '=' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::EqEq);
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedChar { ch: '=', pos: i });
                }
            }
            '!' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::NotEq);
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedChar { ch: '!', pos: i });
                }
            }
            '<' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::LtEq);
                    i += 2;
                } else {
                    tokens.push(Token::Lt);
                    i += 1;
                }
            }
            '>' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::GtEq);
                    i += 2;
                } else {
                    tokens.push(Token::Gt);
                    i += 1;
                }
            }
            '"' | '\'' => {
                let quote = c;
                let start = i;
                i += 1;
                let mut s = String::new();
                loop {
                    match chars.get(i) {
                        Some(&ch) if ch == quote => {
                            i += 1;
                            break;
                        }
                        Some(&ch) => {
                            s.push(ch);
                            i += 1;
                        }
                        None => return Err(ExprError::UnterminatedString { pos: start }),
                    }
                }
                tokens.push(Token::Str(s));
            }
            _ if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) => {
                let start = i;
                while i < chars.len() && is_number_char(&chars, i) {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let n = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::Syntax(format!("invalid number '{}'", text)))?;
                tokens.push(Token::Number(n));
            }
            _ if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '.')
                {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token::Ident(text));
            }
            _ => return Err(ExprError::UnexpectedChar { ch: c, pos: i }),
        }
    }

    Ok(tokens)
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

/// Characters that may continue a numeric literal.
///
/// Exponent signs are only consumed directly after `e`/`E`, so `1e-3` lexes
/// as one number while `1-3` stays three tokens.
fn is_number_char(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' {
        return true;
    }
    if c == '+' || c == '-' {
        return matches!(chars.get(i.wrapping_sub(1)), Some('e') | Some('E'));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_comparison() {
        let tokens = tokenize("5 > 3").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(5.0), Token::Gt, Token::Number(3.0)]
        );
    }

    #[test]
    fn all_operators() {
        let tokens = tokenize("== != < <= > >= + - * / % ( )").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::EqEq,
                Token::NotEq,
                Token::Lt,
                Token::LtEq,
                Token::Gt,
                Token::GtEq,
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Percent,
                Token::LParen,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn identifiers_and_keywords() {
        let tokens = tokenize("None and not_a_keyword").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("None".to_string()),
                Token::Ident("and".to_string()),
                Token::Ident("not_a_keyword".to_string()),
            ]
        );
    }

    #[test]
    fn numbers() {
        let tokens = tokenize("1 2.5 .5 1e3 1.5e-2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.0),
                Token::Number(2.5),
                Token::Number(0.5),
                Token::Number(1000.0),
                Token::Number(0.015),
            ]
        );
    }

    #[test]
    fn negative_exponent_not_confused_with_subtraction() {
        let tokens = tokenize("1-3").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(1.0), Token::Minus, Token::Number(3.0)]
        );
    }

    #[test]
    fn string_literals() {
        let tokens = tokenize(r#""abc" 'd e'"#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Str("abc".to_string()), Token::Str("d e".to_string())]
        );
    }

    #[test]
    fn unterminated_string() {
        assert!(matches!(
            tokenize("\"abc"),
            Err(ExprError::UnterminatedString { pos: 0 })
        ));
    }

    #[test]
    fn lone_equals_rejected() {
        assert!(matches!(
            tokenize("a = b"),
            Err(ExprError::UnexpectedChar { ch: '=', .. })
        ));
    }

    #[test]
    fn unexpected_character() {
        assert!(matches!(
            tokenize("a & b"),
            Err(ExprError::UnexpectedChar { ch: '&', .. })
        ));
    }

    #[test]
    fn dotted_value_lexes_as_single_ident() {
        // Substituted tokens like "alpha.beta" stay one name so the
        // evaluation error names the whole token.
        let tokens = tokenize("x.y").unwrap();
        assert_eq!(tokens, vec![Token::Ident("x.y".to_string())]);
    }
}
