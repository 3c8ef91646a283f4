//! Circular dependency detection for formula cells.
//!
//! A cell is on a cycle when following the references its formula reads
//! (e.g., A1 reads B1, B1 reads C1, C1 reads A1) leads back to it. This module
//! uses depth-first search over the stored dependencies to find such a path.

use std::collections::{BTreeSet, HashSet};

use super::{CellRef, Grid};

/// Detect a circular dependency through `start`.
/// Returns Some(path) beginning and ending with `start` if one exists.
pub fn detect_cycle(start: &CellRef, grid: &Grid) -> Option<Vec<CellRef>> {
    let mut explored = HashSet::from([start.clone()]);
    let mut path = vec![start.clone()];
    // One pending-dependency iterator per cell on `path`.
    let mut frames = vec![dependencies(start, grid)?.into_iter()];

    while let Some(frame) = frames.last_mut() {
        let Some(dep) = frame.next() else {
            frames.pop();
            path.pop();
            continue;
        };
        if &dep == start {
            path.push(dep);
            return Some(path);
        }
        if explored.contains(&dep) {
            continue;
        }
        if let Some(deps) = dependencies(&dep, grid) {
            explored.insert(dep.clone());
            path.push(dep);
            frames.push(deps.into_iter());
        }
    }

    None
}

// Cloned out so no shard lock is held while walking.
fn dependencies(reference: &CellRef, grid: &Grid) -> Option<BTreeSet<CellRef>> {
    grid.get(reference).map(|entry| entry.dependencies.clone())
}
