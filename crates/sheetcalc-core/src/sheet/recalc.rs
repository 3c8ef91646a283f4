//! Recalculation of the cells downstream of an edit.

use sheetcalc_engine::engine::{Cell, CellError, CellRef, detect_cycle};
use std::collections::{HashMap, HashSet, VecDeque};

use super::Sheet;
use super::notify::ChangeLog;
use crate::config::CyclePolicy;

impl Sheet {
    /// Current value of `reference` as seen by formulas (absent cells read
    /// as nothing, which evaluation treats as 0).
    pub(crate) fn lookup(&self, reference: &CellRef) -> Option<f64> {
        self.grid.get(reference).map(|cell| cell.computed)
    }

    /// Bring every cell that transitively reads `origin` up to date. `origin`
    /// itself must already hold its new value.
    ///
    /// Returns the cycle path when `origin` ends up on a reference cycle.
    pub(crate) fn propagate(
        &mut self,
        origin: &CellRef,
        log: &mut ChangeLog,
    ) -> Option<Vec<CellRef>> {
        match self.config.cycle_policy {
            CyclePolicy::Detect => self.propagate_detect(origin, log),
            CyclePolicy::Unguarded => {
                self.propagate_unguarded(origin, log);
                None
            }
        }
    }

    /// Whether any cell `cell` reads is currently marked cyclic.
    pub(crate) fn reads_cycle(&self, cell: &Cell) -> bool {
        cell.dependencies.iter().any(|dep| {
            self.grid
                .get(dep)
                .is_some_and(|d| d.error == Some(CellError::Cyclic))
        })
    }

    /// Depth-first, one recompute per visit. Diamonds are recomputed once per
    /// path and a cycle never returns.
    fn propagate_unguarded(&mut self, origin: &CellRef, log: &mut ChangeLog) {
        for dependent in self.graph.dependents(origin) {
            if self.recompute(&dependent, log) {
                self.propagate_unguarded(&dependent, log);
            }
        }
    }

    /// Recompute the dependents of `origin` in dependency order. Whatever
    /// cannot be ordered sits on a cycle or reads one, and is marked cyclic.
    fn propagate_detect(
        &mut self,
        origin: &CellRef,
        log: &mut ChangeLog,
    ) -> Option<Vec<CellRef>> {
        let affected: Vec<CellRef> = self
            .graph
            .closure(origin)
            .into_iter()
            .filter(|r| self.grid.contains_key(r))
            .collect();
        if affected.is_empty() {
            return None;
        }
        // Unprocessed precedents per cell, counting only edges inside the set.
        let mut pending: HashMap<CellRef, usize> =
            affected.iter().map(|r| (r.clone(), 0)).collect();
        for precedent in &affected {
            for dependent in self.graph.dependents_of(precedent) {
                if let Some(count) = pending.get_mut(dependent) {
                    *count += 1;
                }
            }
        }

        let mut ready: VecDeque<CellRef> = affected
            .iter()
            .filter(|r| pending.get(*r) == Some(&0))
            .cloned()
            .collect();
        let mut ordered: HashSet<CellRef> = HashSet::new();

        while let Some(current) = ready.pop_front() {
            if &current != origin {
                self.recompute(&current, log);
            }
            for dependent in self.graph.dependents(&current) {
                if let Some(count) = pending.get_mut(&dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(dependent);
                    }
                }
            }
            ordered.insert(current);
        }

        let stuck: Vec<&CellRef> = affected.iter().filter(|r| !ordered.contains(*r)).collect();
        if stuck.is_empty() {
            return None;
        }

        for reference in &stuck {
            if let Some(mut cell) = self.grid.get_mut(*reference) {
                cell.mark_error(CellError::Cyclic);
            }
            log.touch(reference);
        }
        tracing::warn!(
            "Circular dependency: {} cell(s) marked cyclic after editing {}",
            stuck.len(),
            origin
        );

        if ordered.contains(origin) {
            return None;
        }
        detect_cycle(origin, &self.grid)
    }

    /// Re-evaluate one stored cell from its raw text against current values.
    /// Returns false when there is no cell to recompute.
    pub(crate) fn recompute(&mut self, reference: &CellRef, log: &mut ChangeLog) -> bool {
        // Clone out so no shard lock is held while reading other cells.
        let mut cell = match self.grid.get(reference) {
            Some(entry) => entry.value().clone(),
            None => return false,
        };
        cell.recompute(|r| self.lookup(r));
        if cell.error.is_none() && self.reads_cycle(&cell) {
            cell.mark_error(CellError::Cyclic);
        }
        tracing::trace!("Recomputed {} = {}", reference, cell.computed);
        self.grid.insert(reference.clone(), cell);
        log.touch(reference);
        true
    }
}
