//! Edits and queries on a sheet.

use sheetcalc_engine::engine::{
    Cell, CellError, CellRef, FormatKind, FormatMap, evaluate, resolve, tokenize,
    validate_formula,
};
use std::collections::BTreeSet;

use super::Sheet;
use super::notify::{CellChange, CellSnapshot, ChangeLog};
use crate::error::{Result, SheetError};
use crate::viewport::Viewport;

fn parse_ref(reference: &str) -> Result<CellRef> {
    CellRef::parse(reference).ok_or_else(|| SheetError::InvalidReference(reference.to_string()))
}

impl Sheet {
    /// Set a cell from spreadsheet notation (e.g., "B2").
    pub fn set_cell_value(&mut self, reference: &str, text: &str) -> Result<Vec<CellChange>> {
        let reference = parse_ref(reference)?;
        self.set_value(&reference, text)
    }

    /// Store `text` in `reference` and recompute everything that reads it.
    ///
    /// Text identical to the stored raw text is a no-op and empty text clears
    /// the cell. Anything else is trimmed and stored, keeping the cell's
    /// format. Returns one change per touched reference, the edited one first.
    ///
    /// When the edit closes a reference cycle it is still stored and
    /// `SheetError::CyclicReference` is returned, carrying the changes.
    pub fn set_value(&mut self, reference: &CellRef, text: &str) -> Result<Vec<CellChange>> {
        let unchanged = self
            .grid
            .get(reference)
            .is_some_and(|cell| cell.raw == text);
        if unchanged {
            return Ok(Vec::new());
        }

        let mut log = ChangeLog::default();
        if text.is_empty() {
            if !self.clear(reference, &mut log) {
                return Ok(Vec::new());
            }
        } else {
            self.write(reference, text.trim(), &mut log);
        }

        let cycle = self.propagate(reference, &mut log);
        let changes = self.publish(log);
        match cycle {
            Some(path) => Err(SheetError::CyclicReference { path, changes }),
            None => Ok(changes),
        }
    }

    fn write(&mut self, reference: &CellRef, text: &str, log: &mut ChangeLog) {
        let (old_deps, format) = match self.grid.get(reference) {
            Some(cell) => (cell.dependencies.clone(), cell.format.clone()),
            None => (BTreeSet::new(), FormatMap::new()),
        };

        let mut cell = Cell::from_input(text, |r| self.lookup(r));
        cell.format = format;
        // Reading a cycle taints the reader, whichever was written first.
        if cell.error.is_none() && self.reads_cycle(&cell) {
            cell.mark_error(CellError::Cyclic);
        }
        tracing::debug!(
            "Set {} = {:?} (expression: {}, error: {:?})",
            reference,
            cell.raw,
            cell.is_expression,
            cell.error
        );

        self.graph.relink(reference, &old_deps, &cell.dependencies);
        self.grid.insert(reference.clone(), cell);
        log.touch(reference);
    }

    /// Remove the content of `reference`. Returns false when nothing was stored.
    fn clear(&mut self, reference: &CellRef, log: &mut ChangeLog) -> bool {
        let Some((_, old)) = self.grid.remove(reference) else {
            return false;
        };
        self.graph
            .relink(reference, &old.dependencies, &BTreeSet::new());

        if self.config.keep_format_on_clear && !old.format.is_empty() {
            self.grid
                .insert(reference.clone(), Cell::format_only(old.format));
        }
        tracing::debug!("Cleared {}", reference);
        log.touch(reference);
        true
    }

    /// Toggle one format flag (`bold`, `italic`, `strike`, `underline`) on a
    /// cell, creating a format-only cell if none is stored.
    ///
    /// Unknown kinds are ignored. A toggle never changes values, so a cycle
    /// through the cell is not an error here; its cells are published as
    /// cyclic like any other change.
    pub fn set_format(&mut self, kind: &str, reference: &str) -> Result<Vec<CellChange>> {
        let reference = parse_ref(reference)?;
        let kind = match kind.parse::<FormatKind>() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::debug!("Ignoring format toggle on {}: {}", reference, e);
                return Ok(Vec::new());
            }
        };

        let state = self
            .grid
            .entry(reference.clone())
            .or_insert_with(|| Cell::format_only(FormatMap::new()))
            .toggle_format(kind);
        tracing::debug!("Toggled {} on {} -> {}", kind, reference, state);

        let mut log = ChangeLog::default();
        log.touch(&reference);
        if let Some(path) = self.propagate(&reference, &mut log) {
            tracing::debug!(
                "Format toggle on {} sits on a cycle of {} cell(s)",
                reference,
                path.len() - 1
            );
        }
        Ok(self.publish(log))
    }

    /// Snapshot of a stored cell, or None for an empty or malformed reference.
    pub fn get_cell(&self, reference: &str) -> Option<CellSnapshot> {
        let reference = CellRef::parse(reference)?;
        let cell = self.get_value(&reference)?;
        Some(self.snapshot(&reference, &cell))
    }

    pub fn get_value(&self, reference: &CellRef) -> Option<Cell> {
        self.grid.get(reference).map(|cell| cell.value().clone())
    }

    /// Evaluate a formula against the current sheet without storing it.
    /// The leading '=' is optional.
    pub fn evaluate_formula(&self, formula: &str) -> Result<f64> {
        let formula = formula.trim();
        let formula = if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={}", formula)
        };

        validate_formula(&formula)?;
        let tokens = tokenize(&formula)?;
        Ok(evaluate(&resolve(&tokens, |r| self.lookup(r))))
    }

    /// Every stored cell in reading order (row, then column).
    pub fn cells(&self) -> Vec<CellSnapshot> {
        let mut cells: Vec<CellSnapshot> = self
            .grid
            .iter()
            .map(|entry| self.snapshot(entry.key(), entry.value()))
            .collect();
        cells.sort_by(|a, b| {
            a.reference
                .sort_key()
                .cmp(&b.reference.sort_key())
                .then_with(|| a.reference.cmp(&b.reference))
        });
        cells
    }

    /// Current state of every stored cell in the viewport, for a full repaint.
    pub fn region_snapshot(&self, viewport: &mut Viewport) -> Vec<CellChange> {
        viewport
            .visible_refs()
            .iter()
            .filter(|reference| self.grid.contains_key(*reference))
            .map(|reference| self.change_for(reference))
            .collect()
    }
}
