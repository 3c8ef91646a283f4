//! Sheet behavior switches.
//!
//! Deserializable from the `[sheet]` table of a TOML config file; every field
//! is optional and falls back to [`SheetConfig::default`].

use serde::{Deserialize, Serialize};
use sheetcalc_engine::engine::{CYCLIC_TEXT, INVALID_FORMULA_TEXT};
use std::str::FromStr;

/// How recalculation treats circular references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Find cycles, mark their cells cyclic and recompute the rest in
    /// dependency order.
    #[default]
    Detect,
    /// Recompute dependents recursively, depth first, with no guard. A cycle
    /// recurses until the stack is exhausted.
    Unguarded,
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detect" => Ok(CyclePolicy::Detect),
            "unguarded" => Ok(CyclePolicy::Unguarded),
            other => Err(format!(
                "Unknown cycle policy '{}' (expected 'detect' or 'unguarded')",
                other
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub cycle_policy: CyclePolicy,
    /// Keep a cleared cell's formatting instead of deleting the whole record.
    pub keep_format_on_clear: bool,
    /// Display text for cells with a malformed formula.
    pub invalid_formula_text: String,
    /// Display text for cells caught in a cycle.
    pub cyclic_text: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            cycle_policy: CyclePolicy::default(),
            keep_format_on_clear: false,
            invalid_formula_text: INVALID_FORMULA_TEXT.to_string(),
            cyclic_text: CYCLIC_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_policy_from_str() {
        assert_eq!("detect".parse::<CyclePolicy>(), Ok(CyclePolicy::Detect));
        assert_eq!(" Unguarded ".parse::<CyclePolicy>(), Ok(CyclePolicy::Unguarded));
        assert!("sometimes".parse::<CyclePolicy>().is_err());
    }

    #[test]
    fn test_defaults_match_source_behavior() {
        let config = SheetConfig::default();
        assert_eq!(config.cycle_policy, CyclePolicy::Detect);
        assert!(!config.keep_format_on_clear);
        assert_eq!(config.invalid_formula_text, "#INVALID FORMULA");
        assert_eq!(config.cyclic_text, "#ERROR CYCLIC");
    }
}
