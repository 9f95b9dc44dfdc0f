//! Report export (CSV)

pub mod csv;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

pub use self::csv::{export_filename, export_to_dir, write_orders_csv};

/// Export error types
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// IO error while writing the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::with_message(ErrorCode::ExportFailed, err.to_string())
    }
}
