//! # letterpress-batch
//!
//! The per-record generation pipeline: stage a disposable workspace,
//! substitute record fields into eligible files, run the external compiler,
//! deliver the artifact. Records fail individually; the batch keeps going.
//!
//! Call [`run`] with a resolved [`letterpress_core::RunConfig`] and a
//! [`Compiler`] implementation.

pub mod compiler;
pub mod error;
pub mod output;
pub mod runner;
pub mod substitute;
pub mod workspace;

pub use compiler::{Compiler, LatexCompiler};
pub use error::BatchError;
pub use runner::{run, BatchSummary, RecordResult, Stage};
