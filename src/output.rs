// src/output.rs
// =============================================================================
// Writes scraped records out.
//
// Formats:
// - table: human-readable, one question per line, with a summary
// - json: a pretty-printed JSON array
// - jsonl: one JSON object per line
//
// Records go to stdout unless an output file is given. Progress messages
// and logs go to stderr, so piping JSON into another tool just works.
// =============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::extract::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Jsonl,
}

/// Writes `records` to `path`, or to stdout if there is no path
pub fn emit_records(records: &[Record], format: OutputFormat, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_records(&mut out, records, format)?;
            out.flush()?;
            eprintln!("💾 Wrote {} record(s) to {}", records.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_records(&mut out, records, format)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Writes `records` in the given format to any writer
pub fn write_records<W: Write>(out: &mut W, records: &[Record], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, records)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, records: &[Record]) -> io::Result<()> {
    writeln!(out, "{:<70} {}", "TITLE", "URL")?;
    writeln!(out, "{}", "=".repeat(110))?;

    for record in records {
        writeln!(out, "{:<70} {}", truncate(&record.title, 67), record.url)?;
    }

    writeln!(out)?;
    writeln!(out, "📋 Total: {}", records.len())?;
    Ok(())
}

// Shortens long titles for the table, on a char boundary
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
