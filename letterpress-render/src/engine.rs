//! Tera rendering engine — single-record field substitution.
//!
//! Templates are rendered one string at a time, registered under a
//! caller-supplied name. The name is carried into engine errors, so callers
//! pass the path of the file being rendered.

use tera::{Context, Tera};

use letterpress_core::Record;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Context building
// ---------------------------------------------------------------------------

/// Build a tera [`Context`] exposing every record field as a top-level
/// variable: a column `City` is addressed in templates as `{{ City }}`.
pub fn record_context(record: &Record) -> Result<Context, RenderError> {
    Context::from_serialize(record).map_err(RenderError::from)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `template` against `record`, reporting failures under `name`.
///
/// Substitution is strict: referencing a field the record does not carry is
/// an error, as is malformed template syntax. Output is raw text — no HTML
/// escaping is applied, whatever the template name's extension.
pub fn render_str(name: &str, template: &str, record: &Record) -> Result<String, RenderError> {
    let context = record_context(record)?;
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(name, template)?;
    tera.render(name, &context).map_err(RenderError::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
