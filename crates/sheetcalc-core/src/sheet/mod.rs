//! Sheet state and logic (UI-agnostic).

mod notify;
mod ops;
mod recalc;
mod state;

pub use notify::{CellChange, CellSnapshot, ChangeCallback, VisibilityFn};
pub use state::Sheet;
