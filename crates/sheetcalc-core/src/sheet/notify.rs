//! Change notifications for the presentation layer.
//!
//! Every mutating call returns one [`CellChange`] per affected reference, in
//! the order the references were first touched. If an observer is installed,
//! the changes it considers visible are also pushed to its callback.

use serde::Serialize;
use sheetcalc_engine::engine::{Cell, CellError, CellRef, FormatMap};
use std::collections::HashSet;

use super::Sheet;

/// Read-only view of a stored cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellSnapshot {
    pub reference: CellRef,
    pub raw: String,
    pub is_expression: bool,
    pub computed: f64,
    pub display: String,
    pub format: FormatMap,
    pub error: Option<CellError>,
}

/// What the presentation layer needs to repaint one reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellChange {
    pub reference: CellRef,
    pub display: String,
    pub format: FormatMap,
    pub error: Option<CellError>,
    /// The reference no longer holds a cell.
    pub removed: bool,
}

/// Visibility query supplied by the presentation layer.
pub type VisibilityFn = Box<dyn Fn(&CellRef) -> bool>;

/// Callback receiving visible changes.
pub type ChangeCallback = Box<dyn FnMut(&CellChange)>;

pub(crate) struct Observer {
    is_visible: VisibilityFn,
    on_change: ChangeCallback,
}

/// References touched by one operation, first-touch order, no repeats.
#[derive(Debug, Default)]
pub(crate) struct ChangeLog {
    order: Vec<CellRef>,
    seen: HashSet<CellRef>,
}

impl ChangeLog {
    pub(crate) fn touch(&mut self, reference: &CellRef) {
        if self.seen.insert(reference.clone()) {
            self.order.push(reference.clone());
        }
    }
}

impl Sheet {
    /// Install the presentation layer's visibility query and change sink.
    /// Replaces any previous observer.
    pub fn set_observer(
        &mut self,
        is_visible: impl Fn(&CellRef) -> bool + 'static,
        on_change: impl FnMut(&CellChange) + 'static,
    ) {
        self.observer = Some(Observer {
            is_visible: Box::new(is_visible),
            on_change: Box::new(on_change),
        });
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub(crate) fn snapshot(&self, reference: &CellRef, cell: &Cell) -> CellSnapshot {
        CellSnapshot {
            reference: reference.clone(),
            raw: cell.raw.clone(),
            is_expression: cell.is_expression,
            computed: cell.computed,
            display: self.display(cell),
            format: cell.format.clone(),
            error: cell.error,
        }
    }

    pub(crate) fn display(&self, cell: &Cell) -> String {
        cell.display_with(&self.config.invalid_formula_text, &self.config.cyclic_text)
    }

    pub(crate) fn change_for(&self, reference: &CellRef) -> CellChange {
        match self.grid.get(reference) {
            Some(cell) => CellChange {
                reference: reference.clone(),
                display: self.display(&cell),
                format: cell.format.clone(),
                error: cell.error,
                removed: false,
            },
            None => CellChange {
                reference: reference.clone(),
                display: String::new(),
                format: FormatMap::new(),
                error: None,
                removed: true,
            },
        }
    }

    /// Build the final state of every touched reference and hand the visible
    /// ones to the observer.
    pub(crate) fn publish(&mut self, log: ChangeLog) -> Vec<CellChange> {
        let changes: Vec<CellChange> = log.order.iter().map(|r| self.change_for(r)).collect();

        if let Some(observer) = self.observer.as_mut() {
            for change in &changes {
                if (observer.is_visible)(&change.reference) {
                    (observer.on_change)(change);
                }
            }
        }

        changes
    }
}
