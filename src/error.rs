//! Error types for the sheetcalc command-line front end

use sheetcalc_core::SheetError;
use thiserror::Error;

/// Errors that can occur in the sheetcalc application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Line {line}: {source}")]
    Sheet { line: usize, source: SheetError },
}

pub type Result<T> = std::result::Result<T, AppError>;
