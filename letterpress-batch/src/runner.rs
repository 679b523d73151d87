//! Batch orchestration.
//!
//! One run: load every record up front, then per record stage a workspace,
//! substitute fields, compile, and copy the artifact into the output
//! directory. A failure at any stage ends that record's processing and the
//! run moves on; only data-source errors abort the whole run.

use std::fmt;
use std::path::PathBuf;

use letterpress_core::{load_records, Record, RunConfig, ARTIFACT_EXTENSION};

use crate::compiler::Compiler;
use crate::error::BatchError;
use crate::output;
use crate::substitute;
use crate::workspace;

// ---------------------------------------------------------------------------
// Per-record results
// ---------------------------------------------------------------------------

/// Pipeline stage a record failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Staging,
    Substituting,
    Compiling,
    Copying,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Staging => "staging",
            Stage::Substituting => "substituting",
            Stage::Compiling => "compiling",
            Stage::Copying => "copying",
        })
    }
}

/// Outcome of one record's generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordResult {
    /// Document generated and delivered.
    Generated { name: String, path: PathBuf },
    /// Dry-run mode: the document *would* have been generated.
    WouldGenerate { name: String, file_name: String },
    /// Record failed at `stage` and was skipped; the run continued.
    Skipped {
        name: String,
        stage: Stage,
        reason: String,
    },
}

/// Outcome of a whole batch run.
#[derive(Debug)]
pub struct BatchSummary {
    /// One entry per generation attempt, in data-source order.
    pub results: Vec<RecordResult>,
    /// Rows dropped up front for having a blank name field.
    pub blank_records: usize,
}

impl BatchSummary {
    /// Documents generated and delivered.
    pub fn generated(&self) -> usize {
        self.count(|r| matches!(r, RecordResult::Generated { .. }))
    }

    /// Documents a dry run would have generated.
    pub fn would_generate(&self) -> usize {
        self.count(|r| matches!(r, RecordResult::WouldGenerate { .. }))
    }

    /// Records skipped by a per-record failure.
    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, RecordResult::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&RecordResult) -> bool) -> usize {
        self.results.iter().filter(|r| pred(r)).count()
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the batch: one generation attempt per nameable record.
///
/// Returns `Err` only for run-level failures (unreadable data source);
/// per-record failures land in the summary as [`RecordResult::Skipped`].
/// The workspace is removed after every record and once more at end of run,
/// so at most one exists at a time and none survives the run — even a stale
/// one left behind by an interrupted earlier run.
pub fn run(
    config: &RunConfig,
    compiler: &dyn Compiler,
    dry_run: bool,
) -> Result<BatchSummary, BatchError> {
    let records = load_records(&config.data_file)?;
    tracing::info!(
        "loaded {} records from {}",
        records.len(),
        config.data_file.display()
    );

    let mut results = Vec::new();
    let mut blank_records = 0;
    for record in &records {
        if record.is_blank() {
            blank_records += 1;
            tracing::debug!("dropping blank row ({record})");
            continue;
        }
        let name = record.name().to_string();
        tracing::info!("processing '{name}'");
        results.push(generate(config, compiler, record, &name, dry_run));
        if !dry_run {
            cleanup_workspace(config);
        }
    }
    if !dry_run {
        cleanup_workspace(config);
    }

    let summary = BatchSummary {
        results,
        blank_records,
    };
    if dry_run {
        tracing::info!(
            "dry-run finished: {} would generate, {} skipped, {} blank rows",
            summary.would_generate(),
            summary.skipped(),
            summary.blank_records
        );
    } else {
        tracing::info!(
            "run finished: {} generated, {} skipped, {} blank rows",
            summary.generated(),
            summary.skipped(),
            summary.blank_records
        );
    }
    Ok(summary)
}

/// Best-effort workspace removal; a failure is logged, never fatal.
fn cleanup_workspace(config: &RunConfig) {
    if let Err(err) = workspace::teardown(&config.workspace_dir) {
        tracing::warn!("workspace not removed: {err}");
    }
}

fn generate(
    config: &RunConfig,
    compiler: &dyn Compiler,
    record: &Record,
    name: &str,
    dry_run: bool,
) -> RecordResult {
    match build_document(config, compiler, record, name, dry_run) {
        Ok(result) => result,
        Err((stage, err)) => {
            tracing::error!("record '{name}' skipped while {stage}: {err}");
            RecordResult::Skipped {
                name: name.to_string(),
                stage,
                reason: err.to_string(),
            }
        }
    }
}

fn build_document(
    config: &RunConfig,
    compiler: &dyn Compiler,
    record: &Record,
    name: &str,
    dry_run: bool,
) -> Result<RecordResult, (Stage, BatchError)> {
    if dry_run {
        let file_name = artifact_name(config, record).map_err(|e| (Stage::Copying, e))?;
        return Ok(RecordResult::WouldGenerate {
            name: name.to_string(),
            file_name,
        });
    }

    workspace::stage(&config.template_dir, &config.workspace_dir)
        .map_err(|e| (Stage::Staging, e))?;
    let rewritten = substitute::substitute_tree(&config.workspace_dir, record)
        .map_err(|e| (Stage::Substituting, e))?;
    tracing::info!("substituted {rewritten} files for '{name}'");
    compiler
        .compile(&config.workspace_dir, &config.tex_file, config.verbose)
        .map_err(|e| (Stage::Compiling, e))?;

    let artifact = config.workspace_dir.join(config.artifact_file());
    if !artifact.is_file() {
        return Err((
            Stage::Copying,
            BatchError::MissingArtifact { path: artifact },
        ));
    }
    let file_name = artifact_name(config, record).map_err(|e| (Stage::Copying, e))?;
    let path = output::deliver(&artifact, &config.output_dir, &file_name)
        .map_err(|e| (Stage::Copying, e))?;
    Ok(RecordResult::Generated {
        name: name.to_string(),
        path,
    })
}

/// Output file name for `record`: the evaluated naming template plus the
/// artifact extension.
fn artifact_name(config: &RunConfig, record: &Record) -> Result<String, BatchError> {
    let stem = output::evaluate_name(&config.output_template, record)?;
    Ok(format!("{stem}.{ARTIFACT_EXTENSION}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
