//! Reverse dependency graph.
//!
//! Maps a cell to the cells whose formulas read it, i.e. who must be
//! recomputed when it changes. What a cell itself reads lives on the cell
//! (`Cell::dependencies`); the two views are kept in step by [`relink`].
//!
//! [`relink`]: DependencyGraph::relink

use sheetcalc_engine::engine::CellRef;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// Cell -> cells that depend on it. Never holds an empty set.
    dependents: HashMap<CellRef, BTreeSet<CellRef>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent`'s formula reads `precedent`.
    pub fn link(&mut self, precedent: &CellRef, dependent: &CellRef) {
        self.dependents
            .entry(precedent.clone())
            .or_default()
            .insert(dependent.clone());
    }

    /// Forget that `dependent` reads `precedent`.
    pub fn unlink(&mut self, precedent: &CellRef, dependent: &CellRef) {
        if let Some(set) = self.dependents.get_mut(precedent) {
            set.remove(dependent);
            if set.is_empty() {
                self.dependents.remove(precedent);
            }
        }
    }

    /// Move `reference` from the entries of its old dependencies to those of
    /// its new ones, touching only the difference.
    /// Returns (unlinked, linked).
    pub fn relink(
        &mut self,
        reference: &CellRef,
        old: &BTreeSet<CellRef>,
        new: &BTreeSet<CellRef>,
    ) -> (Vec<CellRef>, Vec<CellRef>) {
        let removed: Vec<CellRef> = old.difference(new).cloned().collect();
        let added: Vec<CellRef> = new.difference(old).cloned().collect();

        for precedent in &removed {
            self.unlink(precedent, reference);
        }
        for precedent in &added {
            self.link(precedent, reference);
        }

        (removed, added)
    }

    /// Cells that read `reference`, in reference order.
    pub fn dependents_of(&self, reference: &CellRef) -> impl Iterator<Item = &CellRef> + '_ {
        self.dependents
            .get(reference)
            .into_iter()
            .flat_map(|set| set.iter())
    }

    /// Owned copy of [`dependents_of`](Self::dependents_of), for callers that
    /// mutate the graph while walking it.
    pub fn dependents(&self, reference: &CellRef) -> Vec<CellRef> {
        self.dependents_of(reference).cloned().collect()
    }

    pub fn has_edge(&self, precedent: &CellRef, dependent: &CellRef) -> bool {
        self.dependents
            .get(precedent)
            .is_some_and(|set| set.contains(dependent))
    }

    /// `start` followed by every cell that transitively depends on it,
    /// breadth first. Each cell appears once even when the graph has cycles.
    pub fn closure(&self, start: &CellRef) -> Vec<CellRef> {
        let mut seen: HashSet<CellRef> = HashSet::from([start.clone()]);
        let mut order = vec![start.clone()];
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(current) = queue.pop_front() {
            for dependent in self.dependents_of(&current) {
                if seen.insert(dependent.clone()) {
                    order.push(dependent.clone());
                    queue.push_back(dependent.clone());
                }
            }
        }

        order
    }

    /// Number of cells that have at least one dependent.
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}
