//! Letterpress core library — domain types, run configuration, data source.
//!
//! Public API surface:
//! - [`types`] — [`Record`] and the [`NAME_FIELD`] constant
//! - [`config`] — [`RunConfig`] resolved options
//! - [`datasource`] — CSV loading ([`load_records`])
//! - [`error`] — [`DataError`]

pub mod config;
pub mod datasource;
pub mod error;
pub mod types;

pub use config::{RunConfig, ARTIFACT_EXTENSION};
pub use datasource::load_records;
pub use error::DataError;
pub use types::{Record, NAME_FIELD};
