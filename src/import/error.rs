//! Import error types

use std::path::PathBuf;

use thiserror::Error;

use crate::db::DbError;

/// Failures that stop an import run
///
/// Per-row persistence failures are counted in the report instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database setup failed: {0}")]
    Database(#[from] DbError),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
