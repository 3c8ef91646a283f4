//! Formula lexer.
//!
//! Splits a formula such as `=A1*(2.5+b2)` into numbers, references,
//! operators and parentheses. The lexer does not check the grammar; that is
//! [`validate_formula`](super::validate_formula)'s job.

use std::fmt;

use super::error::LexError;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

/// A formula token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// Uppercased reference text, e.g. `A1` or a bare label `B`.
    Reference(String),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Reference(r) => f.write_str(r),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
        }
    }
}

/// Tokenize a formula. A single leading `=` is skipped.
pub fn tokenize(formula: &str) -> Result<Vec<Token>, LexError> {
    let body_start = usize::from(formula.starts_with('='));
    let chars: Vec<(usize, char)> = formula.char_indices().skip(body_start).collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];

        if let Some(op) = Operator::from_char(c) {
            tokens.push(Token::Operator(op));
            i += 1;
        } else if c == '(' {
            tokens.push(Token::OpenParen);
            i += 1;
        } else if c == ')' {
            tokens.push(Token::CloseParen);
            i += 1;
        } else if c.is_ascii_alphabetic() {
            // [A-Za-z]+\d*
            let start = i;
            while i < chars.len() && chars[i].1.is_ascii_alphabetic() {
                i += 1;
            }
            while i < chars.len() && chars[i].1.is_ascii_digit() {
                i += 1;
            }
            let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
            tokens.push(Token::Reference(text.to_ascii_uppercase()));
        } else if c.is_ascii_digit() {
            // \d+(\.\d+)?
            let start = i;
            while i < chars.len() && chars[i].1.is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i].1 == '.' {
                i += 1;
                let fraction_start = i;
                while i < chars.len() && chars[i].1.is_ascii_digit() {
                    i += 1;
                }
                if i == fraction_start {
                    return Err(LexError::MalformedNumber { pos });
                }
            }
            let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| LexError::MalformedNumber { pos })?;
            tokens.push(Token::Number(value));
        } else {
            return Err(LexError::UnexpectedChar { ch: c, pos });
        }
    }

    Ok(tokens)
}
