use crate::config::SheetConfig;
use crate::graph::DependencyGraph;
use sheetcalc_engine::engine::Grid;

use super::notify::Observer;

/// One spreadsheet: the cell store, its reverse dependency graph and the
/// settings that govern recalculation.
///
/// All mutation goes through `&mut self`, so a sheet is single-writer by
/// construction. Readers get cloned snapshots, never the store itself.
pub struct Sheet {
    /// The cell store (DashMap is internally Arc-based, clones are cheap)
    pub(crate) grid: Grid,
    /// Reverse dependency map: cell -> cells that depend on it
    pub(crate) graph: DependencyGraph,
    pub(crate) config: SheetConfig,
    /// Presentation-side visibility filter and change sink
    pub(crate) observer: Option<Observer>,
}

impl Sheet {
    /// Create an empty sheet with default settings.
    pub fn new() -> Self {
        Self::with_config(SheetConfig::default())
    }

    pub fn with_config(config: SheetConfig) -> Self {
        Sheet {
            grid: Grid::default(),
            graph: DependencyGraph::new(),
            config,
            observer: None,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Number of stored cells, format-only cells included.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
