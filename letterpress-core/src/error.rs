//! Error types for letterpress-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reading the data source.
///
/// Every variant is fatal for the run: a batch cannot proceed without its
/// records.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV open or parse failure, annotated with the data source path.
    #[error("failed to read data source {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The data source was readable but had no header row to define columns.
    #[error("data source {path} has no header row")]
    MissingHeader { path: PathBuf },
}

/// Convenience constructor for [`DataError::Csv`].
pub(crate) fn csv_err(path: impl Into<PathBuf>, source: csv::Error) -> DataError {
    DataError::Csv {
        path: path.into(),
        source,
    }
}
