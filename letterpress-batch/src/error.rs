//! Error types for letterpress-batch.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use letterpress_core::DataError;
use letterpress_render::RenderError;

/// All errors that can arise from batch generation.
#[derive(Debug, Error)]
pub enum BatchError {
    /// An error from the data source. Always fatal for the run.
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// An error from the rendering engine.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace path would clobber the template directory itself.
    #[error("workspace directory {path} collides with the template directory")]
    WorkspaceCollision { path: PathBuf },

    /// The compiler subprocess could not be launched at all.
    #[error("failed to launch compiler '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran to completion but reported failure.
    #[error("compiler '{program}' failed with {status}")]
    Compiler { program: String, status: ExitStatus },

    /// The compiler reported success but the expected artifact is missing.
    #[error("no artifact at {path} after compilation")]
    MissingArtifact { path: PathBuf },

    /// An output name rendered to something unusable as a plain file name.
    #[error("output name {name:?} is not a plain file name")]
    UnsafeOutputName { name: String },
}

/// Convenience constructor for [`BatchError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BatchError {
    BatchError::Io {
        path: path.into(),
        source,
    }
}
