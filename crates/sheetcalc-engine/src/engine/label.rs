//! Column labels in bijective base-26 (1 -> A, 26 -> Z, 27 -> AA).

use std::collections::HashMap;

/// Convert a 1-based column index to spreadsheet-style letters.
///
/// Index 0 has no label and yields an empty string.
pub fn column_label(index: usize) -> String {
    let mut result = String::new();
    let mut n = index as u128;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Convert spreadsheet letters back to a 1-based column index.
///
/// Returns None for empty input, non-letters, or indices that overflow `usize`.
pub fn column_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut acc = 0usize;
    for c in label.bytes() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc)
}

/// Memoized [`column_label`], keyed by index.
#[derive(Debug, Default, Clone)]
pub struct ColumnLabeler {
    cache: HashMap<usize, String>,
}

impl ColumnLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&mut self, index: usize) -> &str {
        self.cache
            .entry(index)
            .or_insert_with(|| column_label(index))
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        let letters: Vec<String> = (1..=26).map(column_label).collect();
        let expected: Vec<String> = ('A'..='Z').map(|c| c.to_string()).collect();
        assert_eq!(letters, expected);
    }

    #[test]
    fn test_rollover() {
        assert_eq!(column_label(27), "AA");
        assert_eq!(column_label(28), "AB");
        assert_eq!(column_label(52), "AZ");
        assert_eq!(column_label(53), "BA");
        assert_eq!(column_label(702), "ZZ");
        assert_eq!(column_label(703), "AAA");
    }

    #[test]
    fn test_zero_has_no_label() {
        assert_eq!(column_label(0), "");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(1));
        assert_eq!(column_index("z"), Some(26));
        assert_eq!(column_index("AA"), Some(27));
        assert_eq!(column_index("BA"), Some(53));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn test_column_index_overflow_returns_none() {
        assert_eq!(column_index(&"Z".repeat(40)), None);
    }

    #[test]
    fn test_max_usize_label() {
        let letters = column_label(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_labeler_memoizes() {
        let mut labeler = ColumnLabeler::new();
        assert_eq!(labeler.label(27), "AA");
        assert_eq!(labeler.label(27), "AA");
        assert_eq!(labeler.label(1), "A");
        assert_eq!(labeler.cached(), 2);
    }
}
