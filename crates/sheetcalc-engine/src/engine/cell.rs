//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`Cell`] - Raw text, computed value, dependencies, error state and format
//! - [`CellError`] - Why a formula cell has no usable value
//! - [`FormatKind`], [`FormatMap`] - Per-cell text formatting flags
//! - [`Grid`] - Thread-safe sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::cell_ref::CellRef;
use super::deps::{extract_references, parse_literal};
use super::eval::{evaluate, resolve};
use super::format::{CYCLIC_TEXT, INVALID_FORMULA_TEXT, format_number};
use super::lexer::tokenize;
use super::validate::validate_formula;

/// Error state of a formula cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellError {
    /// The formula does not match the formula grammar.
    InvalidFormula,
    /// The formula sits on, or downstream of, a reference cycle.
    Cyclic,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellError::InvalidFormula => f.write_str("invalidFormula"),
            CellError::Cyclic => f.write_str("cyclic"),
        }
    }
}

/// Text formatting flags a cell can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Bold,
    Italic,
    Strike,
    Underline,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Bold,
        FormatKind::Italic,
        FormatKind::Strike,
        FormatKind::Underline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatKind::Bold => "bold",
            FormatKind::Italic => "italic",
            FormatKind::Strike => "strike",
            FormatKind::Underline => "underline",
        }
    }
}

impl FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown format kind: {}", s))
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format flags that have been toggled at least once on a cell.
pub type FormatMap = BTreeMap<FormatKind, bool>;

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Trimmed text as entered. Empty only for cells that hold just a format.
    pub raw: String,
    pub is_expression: bool,
    pub computed: f64,
    /// References read by the formula (empty for literals).
    pub dependencies: BTreeSet<CellRef>,
    pub error: Option<CellError>,
    pub format: FormatMap,
}

impl Cell {
    /// A cell with no content, holding only formatting.
    pub fn format_only(format: FormatMap) -> Cell {
        Cell {
            raw: String::new(),
            is_expression: false,
            computed: 0.0,
            dependencies: BTreeSet::new(),
            error: None,
            format,
        }
    }

    /// Classify and compute `raw`.
    ///
    /// - Starts with '=' -> expression; validated, then evaluated against `lookup`
    /// - Strict decimal number -> literal with that value
    /// - Anything else -> literal text computing as 0
    pub fn from_input(raw: &str, lookup: impl Fn(&CellRef) -> Option<f64>) -> Cell {
        let mut cell = Cell::format_only(FormatMap::new());
        cell.raw = raw.to_string();
        cell.recompute(lookup);
        cell
    }

    /// Re-evaluate the cell from its raw text.
    pub fn recompute(&mut self, lookup: impl Fn(&CellRef) -> Option<f64>) {
        self.is_expression = self.raw.starts_with('=');
        self.error = None;
        self.dependencies.clear();

        if !self.is_expression {
            self.computed = parse_literal(&self.raw);
            return;
        }

        let tokens = match validate_formula(&self.raw).map(|_| tokenize(&self.raw)) {
            Ok(Ok(tokens)) => tokens,
            _ => {
                self.mark_error(CellError::InvalidFormula);
                return;
            }
        };
        self.computed = evaluate(&resolve(&tokens, lookup));
        self.dependencies = extract_references(&self.raw);
    }

    /// Pin the value to 0 and record why.
    pub fn mark_error(&mut self, error: CellError) {
        self.computed = 0.0;
        self.error = Some(error);
    }

    /// Flip one format flag and return its new state.
    pub fn toggle_format(&mut self, kind: FormatKind) -> bool {
        let flag = self.format.entry(kind).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Text shown for the cell, using the default error strings.
    pub fn display(&self) -> String {
        self.display_with(INVALID_FORMULA_TEXT, CYCLIC_TEXT)
    }

    /// Text shown for the cell: the formatted value for expressions, the raw
    /// text for literals, or an error string.
    pub fn display_with(&self, invalid_formula_text: &str, cyclic_text: &str) -> String {
        match self.error {
            Some(CellError::Cyclic) => cyclic_text.to_string(),
            Some(CellError::InvalidFormula) => invalid_formula_text.to_string(),
            None if self.is_expression => format_number(self.computed),
            None => self.raw.clone(),
        }
    }
}

/// Thread-safe sparse grid storage (clones are cheap).
pub type Grid = Arc<DashMap<CellRef, Cell>>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_cells(_: &CellRef) -> Option<f64> {
        None
    }

    #[test]
    fn test_numeric_literal() {
        let cell = Cell::from_input("42.5", no_cells);
        assert!(!cell.is_expression);
        assert_eq!(cell.computed, 42.5);
        assert!(cell.dependencies.is_empty());
        assert_eq!(cell.display(), "42.5");
    }

    #[test]
    fn test_text_literal_computes_zero() {
        let cell = Cell::from_input("hello A1", no_cells);
        assert!(!cell.is_expression);
        assert_eq!(cell.computed, 0.0);
        assert!(cell.dependencies.is_empty());
        assert_eq!(cell.display(), "hello A1");
    }

    #[test]
    fn test_expression_with_references() {
        let cell = Cell::from_input("=A1*2+b3", |r| match r.as_str() {
            "A1" => Some(4.0),
            "B3" => Some(1.0),
            _ => None,
        });
        assert!(cell.is_expression);
        assert_eq!(cell.computed, 9.0);
        let deps: Vec<&str> = cell.dependencies.iter().map(|r| r.as_str()).collect();
        assert_eq!(deps, vec!["A1", "B3"]);
        assert_eq!(cell.display(), "9");
        assert_eq!(cell.error, None);
    }

    #[test]
    fn test_invalid_formula() {
        let cell = Cell::from_input("=A1++1", |_| Some(3.0));
        assert!(cell.is_expression);
        assert_eq!(cell.error, Some(CellError::InvalidFormula));
        assert_eq!(cell.computed, 0.0);
        assert!(cell.dependencies.is_empty());
        assert_eq!(cell.display(), INVALID_FORMULA_TEXT);
    }

    #[test]
    fn test_recompute_clears_previous_error() {
        let mut cell = Cell::from_input("=1+1", no_cells);
        cell.mark_error(CellError::Cyclic);
        assert_eq!(cell.display(), CYCLIC_TEXT);
        cell.recompute(no_cells);
        assert_eq!(cell.error, None);
        assert_eq!(cell.computed, 2.0);
    }

    #[test]
    fn test_toggle_format() {
        let mut cell = Cell::format_only(FormatMap::new());
        assert_eq!(cell.format.get(&FormatKind::Bold), None);
        assert!(cell.toggle_format(FormatKind::Bold));
        assert_eq!(cell.format.get(&FormatKind::Bold), Some(&true));
        assert!(!cell.toggle_format(FormatKind::Bold));
        assert_eq!(cell.format.get(&FormatKind::Bold), Some(&false));
        assert!(cell.raw.is_empty());
    }

    #[test]
    fn test_format_kind_from_str() {
        assert_eq!("bold".parse::<FormatKind>(), Ok(FormatKind::Bold));
        assert_eq!("strike".parse::<FormatKind>(), Ok(FormatKind::Strike));
        assert!("Bold".parse::<FormatKind>().is_err());
        assert!("color".parse::<FormatKind>().is_err());
    }

    #[test]
    fn test_display_division_by_zero() {
        let cell = Cell::from_input("=1/0", no_cells);
        assert_eq!(cell.error, None);
        assert_eq!(cell.display(), "#INF!");
    }
}
