mod assert_err;
mod csv;
mod domain;

use crate::csv::csv_reader::read_csv_source;
use ::csv::WriterBuilder;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use domain::{
    record::Record,
    record_builder::{build_records, parse_table, ParsedTable},
};
use std::{
    io::{stdout, Write},
    path::PathBuf,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Load CSV rows as named-field records", long_about = None)]
struct Cli {
    /// CSV file to read; the first non-blank line is the header
    path: PathBuf,

    /// Number of records shown in preview mode
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Preview)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Record count plus the first few records
    Preview,
    /// One JSON object per record
    Json,
    /// Normalized table with sanitized headers
    Csv,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = stdout().lock();

    if cli.format == OutputFormat::Preview {
        writeln!(out, "Reading CSV from: {}", cli.path.display())?;
    }

    let text = match read_csv_source(&cli.path) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "CSV source unavailable");
            match cli.format {
                OutputFormat::Preview => writeln!(out, "Error reading CSV: {}", err)?,
                _ => eprintln!("Error reading CSV: {}", err),
            }
            return Ok(());
        }
    };

    match cli.format {
        OutputFormat::Preview => write_preview(&mut out, &build_records(&text), cli.preview),
        OutputFormat::Json => write_json_lines(&mut out, &build_records(&text)),
        OutputFormat::Csv => write_normalized_csv(&mut out, &parse_table(&text)),
    }
}

fn write_preview<W: Write>(out: &mut W, records: &[Record], limit: usize) -> Result<()> {
    writeln!(out, "Created {} records.", records.len())?;
    for (index, record) in records.iter().take(limit).enumerate() {
        debug!(%record, "previewing record");
        let fields = serde_json::to_string(record).context("Failed to render record")?;
        writeln!(out, "[{}] {}", index + 1, fields)?;
    }
    if records.len() > limit {
        writeln!(out, "... (only first {} shown)", limit)?;
    }
    Ok(())
}

fn write_json_lines<W: Write>(out: &mut W, records: &[Record]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record).context("Failed to write JSON record")?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_normalized_csv<W: Write>(out: &mut W, table: &ParsedTable) -> Result<()> {
    if table.headers.is_empty() {
        return Ok(());
    }

    // Long rows keep their surplus values past the header width.
    let mut writer = WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record(&table.headers)?;
    for record in &table.records {
        writer.write_record(record.to_ordered_map().iter().map(|(_, value)| value))?;
    }
    writer.flush()?;

    Ok(())
}
