//! Error types for sheetcalc core.

use crate::sheet::CellChange;
use sheetcalc_engine::engine::{CellRef, FormulaError, LexError};
use thiserror::Error;

/// Errors that can occur while operating on a sheet
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Invalid formula: {0}")]
    InvalidFormula(#[from] FormulaError),

    #[error("Unreadable formula text: {0}")]
    Lex(#[from] LexError),

    /// The edit was stored anyway; `changes` lists what it touched, the
    /// cells marked cyclic included.
    #[error("Circular dependency detected: {}", join_path(.path))]
    CyclicReference {
        path: Vec<CellRef>,
        changes: Vec<CellChange>,
    },
}

fn join_path(path: &[CellRef]) -> String {
    path.iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_message_lists_path() {
        let path = ["A1", "B1", "A1"]
            .iter()
            .filter_map(|s| CellRef::parse(s))
            .collect();
        let err = SheetError::CyclicReference {
            path,
            changes: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: A1 -> B1 -> A1"
        );
    }

    #[test]
    fn test_lex_and_grammar_errors_read_differently() {
        let lex = SheetError::from(LexError::UnexpectedChar { ch: '^', pos: 2 });
        let grammar = SheetError::from(FormulaError::ExpectedOperand { pos: 3 });
        assert_eq!(
            lex.to_string(),
            "Unreadable formula text: Unexpected character '^' at position 2"
        );
        assert_eq!(
            grammar.to_string(),
            "Invalid formula: Expected an operand at position 3"
        );
    }
}
