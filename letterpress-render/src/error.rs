//! Error types for letterpress-render.

use std::error::Error as _;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera parse or render failure, with the engine's cause chain flattened
    /// into the message. Covers malformed template syntax, references to
    /// fields the record does not carry, and context serialization failures.
    #[error("template error: {message}")]
    Template { message: String },
}

impl From<tera::Error> for RenderError {
    fn from(err: tera::Error) -> Self {
        // Tera buries the interesting part (missing variable, line number) in
        // its source chain; Display alone only says which template failed.
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        RenderError::Template { message }
    }
}
