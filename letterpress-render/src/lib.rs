//! # letterpress-render
//!
//! Tera-backed substitution engine. Renders template text against a single
//! [`letterpress_core::Record`], strictly: a reference to a field the record
//! does not carry fails the render instead of producing empty output.
//!
//! ## Usage
//!
//! ```rust
//! use letterpress_core::Record;
//! use letterpress_render::render_str;
//!
//! let record: Record = [("Name", "Alice")].into_iter().collect();
//! let body = render_str("main.tex", "Dear {{ Name }},", &record).unwrap();
//! assert_eq!(body, "Dear Alice,");
//! ```

pub mod engine;
pub mod error;

pub use engine::{record_context, render_str};
pub use error::RenderError;
