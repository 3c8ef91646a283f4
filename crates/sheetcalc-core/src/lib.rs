//! sheetcalc-core - UI-agnostic sheet model: cell store, dependency graph,
//! recalculation and change notification.

pub mod config;
pub mod error;
pub mod graph;
pub mod sheet;
pub mod viewport;

pub use config::{CyclePolicy, SheetConfig};
pub use error::{Result, SheetError};
pub use graph::DependencyGraph;
pub use sheet::{CellChange, CellSnapshot, ChangeCallback, Sheet, VisibilityFn};
pub use viewport::{Region, Viewport};

pub use sheetcalc_engine::engine::{CellError, CellRef, FormatKind};
