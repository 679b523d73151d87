//! `letterpress generate` — run the batch generation pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use letterpress_batch::{run, BatchSummary, LatexCompiler, RecordResult};
use letterpress_core::RunConfig;

/// Arguments for `letterpress generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Tabular data source with a header row.
    #[arg(long, short = 'd', default_value = "data.csv")]
    pub data_file: PathBuf,

    /// Template directory copied into the workspace for every record.
    #[arg(long, short = 't', default_value = "template")]
    pub template_dir: PathBuf,

    /// Directory receiving one document per record.
    #[arg(long, short = 'o', default_value = "output")]
    pub output_dir: PathBuf,

    /// Primary document file inside the template directory.
    #[arg(long, short = 'l', default_value = "main.tex")]
    pub tex_file: String,

    /// Naming template for output files (extension appended automatically).
    #[arg(long, short = 'f', default_value = "{{ Name }}")]
    pub output_template: String,

    /// Disposable staging directory.
    #[arg(long, default_value = "_workspace")]
    pub workspace_dir: PathBuf,

    /// External compiler binary.
    #[arg(long, default_value = "lualatex")]
    pub compiler: String,

    /// Report what would be generated without staging, compiling, or
    /// writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Stream compiler output to the console while building documents.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let config = RunConfig {
            data_file: self.data_file,
            template_dir: self.template_dir,
            output_dir: self.output_dir,
            tex_file: self.tex_file,
            output_template: self.output_template,
            workspace_dir: self.workspace_dir,
            compiler: self.compiler,
            verbose: self.verbose,
        };
        let compiler = LatexCompiler::new(config.compiler.clone());

        let summary = run(&config, &compiler, self.dry_run)
            .with_context(|| format!("generation failed for {}", config.data_file.display()))?;
        print_summary(&summary, self.dry_run);
        Ok(())
    }
}

fn print_summary(summary: &BatchSummary, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if summary.results.is_empty() {
        println!(
            "{prefix}nothing to generate ({} blank rows)",
            summary.blank_records
        );
        return;
    }

    let produced = if dry_run {
        summary.would_generate()
    } else {
        summary.generated()
    };
    println!(
        "{prefix}{produced} generated, {} skipped, {} blank rows",
        summary.skipped(),
        summary.blank_records
    );

    for result in &summary.results {
        match result {
            RecordResult::Generated { path, .. } => {
                println!("  {}  {}", "✓".green().bold(), path.display());
            }
            RecordResult::WouldGenerate { file_name, .. } => {
                println!("  {}  {file_name}", "~".yellow().bold());
            }
            RecordResult::Skipped {
                name,
                stage,
                reason,
            } => {
                println!("  {}  {name}: {stage} failed ({reason})", "✗".red().bold());
            }
        }
    }
}
