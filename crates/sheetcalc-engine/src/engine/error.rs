//! Error types for formula lexing and validation.

use thiserror::Error;

/// Errors produced while splitting a formula into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Malformed number at position {pos}")]
    MalformedNumber { pos: usize },
}

/// A formula that does not match `= operand (operator operand)*`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Formula must start with '='")]
    MissingEquals,

    #[error("Expected an operand at position {pos}")]
    ExpectedOperand { pos: usize },

    #[error("Expected an operator at position {pos}")]
    ExpectedOperator { pos: usize },

    #[error("Unclosed parenthesis opened at position {pos}")]
    UnclosedParen { pos: usize },
}
