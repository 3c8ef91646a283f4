//! sheetcalc_engine - Formula machinery for the sheetcalc cell-value engine.

pub mod engine;
