//! Dependency extraction and literal classification from raw cell text.
//!
//! References are found by pattern-matching reference-shaped substrings of
//! the raw text (`[A-Za-z]+[0-9]+`), independently of the lexer. The match is
//! loose: any letters-then-digits run counts, wherever it sits.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::cell_ref::CellRef;

/// Extract all cell references from a formula as dependencies.
///
/// References are uppercased and deduplicated. Runs that do not form a valid
/// reference (row 0, overflowing row) are skipped.
pub fn extract_references(formula: &str) -> BTreeSet<CellRef> {
    cell_ref_re()
        .find_iter(formula)
        .filter_map(|m| CellRef::parse(m.as_str()))
        .collect()
}

/// True if `text` is a plain decimal number: digits with an optional
/// fractional part, or a bare fraction (`.5`). No sign, no exponent, no
/// trailing dot.
pub fn is_numeric_literal(text: &str) -> bool {
    numeric_re().is_match(text)
}

/// Numeric value of a literal cell; text that is not a number counts as 0.
pub fn parse_literal(text: &str) -> f64 {
    if is_numeric_literal(text) {
        text.parse().unwrap_or(0.0)
    } else {
        0.0
    }
}

fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z]+[0-9]+").expect("dependency cell reference regex must compile")
    })
}

fn numeric_re() -> &'static Regex {
    static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();
    NUMERIC_RE.get_or_init(|| {
        Regex::new(r"^(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)$").expect("numeric literal regex must compile")
    })
}
