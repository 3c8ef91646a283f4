//! Cell reference parsing and formatting.
//!
//! A reference is an opaque, uppercase string key: `<ColumnLabel><RowNumber>`
//! (e.g., "A1", "AA100") or a bare column label ("B") for header cells.
//! Input is case-insensitive and normalized on parse.
//!
//! # Examples
//!
//! ```
//! use sheetcalc_engine::engine::CellRef;
//!
//! let cell = CellRef::parse("b3").unwrap();
//! assert_eq!(cell.as_str(), "B3");
//! assert_eq!(cell.column(), Some(2)); // 1-based
//! assert_eq!(cell.row(), Some(3));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::label::{column_index, column_label};

/// A normalized reference to a cell (or a column header).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef(String);

impl CellRef {
    /// Build a reference from 1-based column and row indices.
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef(format!("{}{}", column_label(col), row))
    }

    /// Build a reference from an already computed column label and a 1-based row.
    pub fn from_label(label: &str, row: usize) -> Option<CellRef> {
        if row == 0 || !label.bytes().all(|c| c.is_ascii_alphabetic()) || label.is_empty() {
            return None;
        }
        Some(CellRef(format!("{}{}", label.to_ascii_uppercase(), row)))
    }

    /// Parse a reference from spreadsheet notation (e.g., "A1", "b2", "AA").
    /// Returns None if the input is invalid or the row is 0.
    pub fn parse(name: &str) -> Option<CellRef> {
        let caps = reference_re().captures(name.trim())?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        column_index(letters)?;
        if numbers.is_empty() {
            return Some(CellRef(letters.to_ascii_uppercase()));
        }
        // Leading zeros are dropped so "A01" and "A1" name the same cell.
        let row = numbers.parse::<usize>().ok()?;
        Self::from_label(letters, row)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> (&str, &str) {
        let at = self
            .0
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.0.len());
        self.0.split_at(at)
    }

    /// 1-based column index.
    pub fn column(&self) -> Option<usize> {
        column_index(self.split().0)
    }

    /// 1-based row, or None for a header reference.
    pub fn row(&self) -> Option<usize> {
        self.split().1.parse().ok()
    }

    /// Reading-order key: row first, then column. Headers sort before row 1.
    pub fn sort_key(&self) -> (usize, usize) {
        (self.row().unwrap_or(0), self.column().unwrap_or(0))
    }
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]*)$")
            .expect("cell reference regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl TryFrom<String> for CellRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellRef> for String {
    fn from(value: CellRef) -> Self {
        value.0
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
