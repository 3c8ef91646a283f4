//! Spreadsheet engine API.
//!
//! This module provides the pure computation pieces of the sheet:
//!
//! - [`CellRef`] - Normalized cell references (`A1`, `AA10`, header `B`)
//! - [`column_label`], [`ColumnLabeler`] - Column index ↔ letters
//! - [`tokenize`] - Formula lexer
//! - [`validate_formula`] - Formula well-formedness check
//! - [`resolve`], [`evaluate`] - Reference substitution and arithmetic
//! - [`extract_references`] - Dependency extraction from raw text
//! - [`Cell`], [`Grid`] - Cell records and their storage
//! - [`detect_cycle`] - Circular dependency detection
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod error;
mod eval;
mod format;
mod label;
mod lexer;
mod validate;

pub use cell::{Cell, CellError, FormatKind, FormatMap, Grid};
pub use cell_ref::CellRef;
pub use cycle::detect_cycle;
pub use deps::{extract_references, is_numeric_literal, parse_literal};
pub use error::{FormulaError, LexError};
pub use eval::{evaluate, resolve};
pub use format::{CYCLIC_TEXT, INVALID_FORMULA_TEXT, format_number};
pub use label::{ColumnLabeler, column_index, column_label};
pub use lexer::{Operator, Token, tokenize};
pub use validate::validate_formula;
