//! `letterpress records` — inspect what the data source yields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use letterpress_core::{load_records, Record};

/// Arguments for `letterpress records`.
#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Tabular data source with a header row.
    #[arg(long, short = 'd', default_value = "data.csv")]
    pub data_file: PathBuf,

    /// Emit the records as a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl RecordsArgs {
    pub fn run(self) -> Result<()> {
        let records = load_records(&self.data_file)
            .with_context(|| format!("failed to read {}", self.data_file.display()))?;

        if self.json {
            print_json(&records)?;
            return Ok(());
        }

        print_table(&self.data_file, &records);
        Ok(())
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "fields")]
    fields: usize,
}

fn blank_count(records: &[Record]) -> usize {
    records.iter().filter(|r| r.is_blank()).count()
}

fn print_json(records: &[Record]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(records).context("failed to serialize records JSON")?
    );
    Ok(())
}

fn print_table(data_file: &Path, records: &[Record]) {
    let blank = blank_count(records);
    println!(
        "{} | {} records | {} blank",
        data_file.display(),
        records.len(),
        blank
    );

    if records.is_empty() {
        println!("No records.");
        return;
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .enumerate()
        .map(|(index, record)| RecordRow {
            index: index + 1,
            name: record.name().to_string(),
            status: if record.is_blank() { "blank" } else { "ready" }.to_string(),
            fields: record.len(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if blank > 0 {
        println!("Blank rows are dropped by `letterpress generate`.");
    }
}
