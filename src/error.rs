use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – configuration / data bugs that abort a view
// ---------------------------------------------------------------------------

/// Errors raised while loading tables or shaping them into charts.
///
/// None of these are recoverable at runtime: they point at a missing file,
/// a renamed column or an incomplete neighborhood configuration.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("table '{table}' not found at {}", path.display())]
    MissingTable { table: String, path: PathBuf },

    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("table '{table}', row {row}: column '{column}' is not numeric ({value})")]
    NotNumeric {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("no display color configured for neighborhood '{0}'")]
    MissingColor(String),

    #[error("invalid color '{value}' for neighborhood '{neighborhood}'")]
    InvalidColor { neighborhood: String, value: String },
}
