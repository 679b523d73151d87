//! Letterpress — batch mail-merge document generation CLI.
//!
//! # Usage
//!
//! ```text
//! letterpress generate [--data-file data.csv] [--template-dir template]
//!                      [--output-dir output] [--tex-file main.tex]
//!                      [--output-template "{{ Name }}"] [--compiler lualatex]
//!                      [--workspace-dir _workspace] [--dry-run] [--verbose]
//! letterpress records [--data-file data.csv] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{generate::GenerateArgs, records::RecordsArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "letterpress",
    version,
    about = "Generate one compiled document per data record from a template directory",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one document per record of the data source.
    Generate(GenerateArgs),

    /// List the records the data source yields, without generating.
    Records(RecordsArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Pipeline progress goes through the log facade onto stderr; stdout is
    // reserved for results. RUST_LOG still overrides.
    let default_level = match &cli.command {
        Commands::Generate(args) if args.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Records(args) => args.run(),
    }
}
