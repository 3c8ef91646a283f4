//! Edit scripts: a replayable list of cell edits.
//!
//! ```text
//! # comment
//! A1: 5
//! B1: =A1*2
//! !bold B1
//! A1:
//! ```
//!
//! `REF: TEXT` sets a cell (an empty TEXT clears it) and `!KIND REF` toggles
//! a format flag. Blank lines and lines starting with '#' are skipped.

use crate::error::{AppError, Result};
use sheetcalc_core::{CellChange, CellRef, FormatKind, Sheet, SheetError};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Set { reference: CellRef, text: String },
    Format { kind: FormatKind, reference: CellRef },
}

/// One edit and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub edit: Edit,
}

pub fn parse_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let content = fs::read_to_string(path)?;
    parse_script_content(&content)
}

pub fn parse_script_content(content: &str) -> Result<Vec<ScriptLine>> {
    let mut edits = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_no = line_num + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let edit = match trimmed.strip_prefix('!') {
            Some(rest) => parse_format(rest, line_no)?,
            None => parse_set(trimmed, line_no)?,
        };
        edits.push(ScriptLine { line: line_no, edit });
    }

    Ok(edits)
}

fn parse_set(line: &str, line_no: usize) -> Result<Edit> {
    let Some((ref_str, text)) = line.split_once(':') else {
        return Err(AppError::Parse {
            line: line_no,
            message: "Expected 'REF: TEXT' or '!KIND REF'".to_string(),
        });
    };

    Ok(Edit::Set {
        reference: parse_reference(ref_str, line_no)?,
        text: text.trim().to_string(),
    })
}

fn parse_format(rest: &str, line_no: usize) -> Result<Edit> {
    let mut parts = rest.split_whitespace();
    let (Some(kind_str), Some(ref_str), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::Parse {
            line: line_no,
            message: "Expected '!KIND REF'".to_string(),
        });
    };

    let kind = kind_str
        .to_ascii_lowercase()
        .parse::<FormatKind>()
        .map_err(|message| AppError::Parse {
            line: line_no,
            message,
        })?;

    Ok(Edit::Format {
        kind,
        reference: parse_reference(ref_str, line_no)?,
    })
}

fn parse_reference(text: &str, line_no: usize) -> Result<CellRef> {
    let text = text.trim();
    CellRef::parse(text).ok_or_else(|| AppError::Parse {
        line: line_no,
        message: format!("Invalid cell reference: {}", text),
    })
}

/// Apply `script` to `sheet` in order, passing every change to `on_change`.
///
/// An edit that closes a reference cycle is kept and reported as a warning.
/// Its changes are still passed on and replay carries on with the next line.
pub fn replay(
    sheet: &mut Sheet,
    script: &[ScriptLine],
    mut on_change: impl FnMut(&CellChange),
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    for ScriptLine { line, edit } in script {
        let outcome = match edit {
            Edit::Set { reference, text } => sheet.set_value(reference, text),
            Edit::Format { kind, reference } => {
                sheet.set_format(kind.as_str(), reference.as_str())
            }
        };

        match outcome {
            Ok(changes) => changes.iter().for_each(&mut on_change),
            Err(err @ SheetError::CyclicReference { .. }) => {
                warnings.push(format!("Line {}: {}", line, err));
                if let SheetError::CyclicReference { changes, .. } = &err {
                    changes.iter().for_each(&mut on_change);
                }
            }
            Err(source) => {
                return Err(AppError::Sheet {
                    line: *line,
                    source,
                });
            }
        }
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn r(name: &str) -> CellRef {
        CellRef::parse(name).unwrap()
    }

    #[test]
    fn test_parse_set_lines() {
        let script = parse_script_content("# totals\n\nA1: 5\nb1: =A1*2\nA1:\n").unwrap();
        assert_eq!(
            script,
            vec![
                ScriptLine {
                    line: 3,
                    edit: Edit::Set {
                        reference: r("A1"),
                        text: "5".to_string()
                    }
                },
                ScriptLine {
                    line: 4,
                    edit: Edit::Set {
                        reference: r("B1"),
                        text: "=A1*2".to_string()
                    }
                },
                ScriptLine {
                    line: 5,
                    edit: Edit::Set {
                        reference: r("A1"),
                        text: String::new()
                    }
                },
            ]
        );
    }

    #[test]
    fn test_text_keeps_colons() {
        let script = parse_script_content("C2: note: see A1").unwrap();
        assert_eq!(
            script[0].edit,
            Edit::Set {
                reference: r("C2"),
                text: "note: see A1".to_string()
            }
        );
    }

    #[test]
    fn test_parse_format_line() {
        let script = parse_script_content("!Bold C3").unwrap();
        assert_eq!(
            script[0].edit,
            Edit::Format {
                kind: FormatKind::Bold,
                reference: r("C3")
            }
        );
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_script_content("A1: 1\nnonsense").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 2, .. }));

        let err = parse_script_content("\n\n1A: 5").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 3, .. }));
        assert!(err.to_string().contains("Invalid cell reference: 1A"));

        let err = parse_script_content("!blink A1").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 1, .. }));

        let err = parse_script_content("!bold").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_replay_applies_edits_in_order() {
        let script = parse_script_content("A1: 2\nB1: =A1*3\n!italic B1\nA1: 4\n").unwrap();
        let mut sheet = Sheet::new();
        let mut seen = Vec::new();

        let warnings = replay(&mut sheet, &script, |change| {
            seen.push(format!("{}={}", change.reference, change.display))
        })
        .unwrap();

        assert!(warnings.is_empty());
        assert_eq!(seen, vec!["A1=2", "B1=6", "B1=6", "A1=4", "B1=12"]);
        let b1 = sheet.get_cell("B1").unwrap();
        assert_eq!(b1.format.get(&FormatKind::Italic), Some(&true));
    }

    #[test]
    fn test_replay_continues_past_cycles() {
        let script = parse_script_content("A1: =B1\nB1: =A1\nC1: 9\n").unwrap();
        let mut sheet = Sheet::new();

        let mut seen = Vec::new();

        let warnings = replay(&mut sheet, &script, |change| {
            seen.push(format!("{}={}", change.reference, change.display))
        })
        .unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Line 2: Circular dependency detected"));
        assert_eq!(
            seen,
            vec!["A1=0", "B1=#ERROR CYCLIC", "A1=#ERROR CYCLIC", "C1=9"]
        );
        assert_eq!(sheet.get_cell("C1").unwrap().computed, 9.0);
    }

    #[test]
    fn test_replay_format_toggle_on_cycle_is_not_a_warning() {
        let script = parse_script_content("A1: =B1
B1: =A1
!bold A1
").unwrap();
        let mut sheet = Sheet::new();
        let mut seen = Vec::new();

        let warnings = replay(&mut sheet, &script, |change| {
            seen.push(change.reference.to_string())
        })
        .unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(seen.last().map(String::as_str), Some("B1"));
        let a1 = sheet.get_cell("A1").unwrap();
        assert_eq!(a1.format.get(&FormatKind::Bold), Some(&true));
    }
}
