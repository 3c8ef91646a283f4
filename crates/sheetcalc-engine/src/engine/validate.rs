//! Formula well-formedness check.
//!
//! A formula is accepted when it has the shape
//!
//! ```text
//! formula  := '=' expr
//! expr     := operand (operator operand)*
//! operand  := number | reference | '(' expr ')'
//! number   := [0-9]+ ('.' [0-9]+)?
//! reference:= [A-Za-z]+ [0-9]*
//! operator := '+' | '-' | '*' | '/'
//! ```
//!
//! No whitespace, no unary operators. This runs on the raw text before the
//! formula is tokenized for evaluation.

use super::error::FormulaError;

/// Check that `formula` matches the formula grammar.
///
/// Nesting is tracked on an explicit stack of open parentheses, so depth is
/// bounded by memory and not by the call stack.
pub fn validate_formula(formula: &str) -> Result<(), FormulaError> {
    if !formula.starts_with('=') {
        return Err(FormulaError::MissingEquals);
    }
    let mut scanner = Scanner {
        bytes: formula.as_bytes(),
        pos: 1,
    };
    // Positions of the parentheses still open.
    let mut open: Vec<usize> = Vec::new();

    loop {
        while scanner.peek() == Some(b'(') {
            open.push(scanner.pos);
            scanner.pos += 1;
        }
        scanner.operand()?;

        loop {
            match scanner.peek() {
                Some(b'+' | b'-' | b'*' | b'/') => {
                    scanner.pos += 1;
                    break;
                }
                Some(b')') if !open.is_empty() => {
                    open.pop();
                    scanner.pos += 1;
                }
                _ => {
                    if let Some(&pos) = open.last() {
                        return Err(FormulaError::UnclosedParen { pos });
                    }
                    if scanner.pos < scanner.bytes.len() {
                        return Err(FormulaError::ExpectedOperator { pos: scanner.pos });
                    }
                    return Ok(());
                }
            }
        }
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// A number or a reference. Parentheses are handled by the caller.
    fn operand(&mut self) -> Result<(), FormulaError> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.eat_while(|c| c.is_ascii_digit());
                // Only take the dot when a fraction follows; `1.` leaves the dot behind.
                if self.peek() == Some(b'.')
                    && self.bytes.get(self.pos + 1).is_some_and(u8::is_ascii_digit)
                {
                    self.pos += 1;
                    self.eat_while(|c| c.is_ascii_digit());
                }
                Ok(())
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.eat_while(|c| c.is_ascii_alphabetic());
                self.eat_while(|c| c.is_ascii_digit());
                Ok(())
            }
            _ => Err(FormulaError::ExpectedOperand { pos: self.pos }),
        }
    }
}
