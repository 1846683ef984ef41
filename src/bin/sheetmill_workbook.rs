//! sheetmill-workbook: Split a JSON document into grouped sheets
//!
//! Buckets rows by one column, emits a sheet per group plus an Ungrouped
//! sheet and a summary with per-group record counts.
//!
//! Usage:
//!   # One .jsonl per sheet plus summary.json in a directory
//!   sheetmill-workbook dump.json --group-by region --output-dir ./sheets
//!
//!   # Single stream to stdout with _sheet metadata per row
//!   sheetmill-workbook dump.json --group-by region

// MiMalloc allocator, recommended by simd-json
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use sheetmill::{
    workbook_from_value, HeaderPolicy, SingleWriter, TableConfig, WorkbookWriter,
};
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "sheetmill-workbook")]
#[command(about = "Split a JSON document into grouped sheets", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Column path whose value names each sheet
    #[arg(long, short = 'g')]
    group_by: String,

    /// Output directory for per-sheet .jsonl files and summary.json
    /// If omitted, writes a single stream to stdout
    #[arg(long, short = 'o')]
    output_dir: Option<String>,

    /// Comma-separated container fields checked at the document root
    #[arg(long)]
    container: Option<String>,

    /// Only emit columns present in each sheet's first row
    #[arg(long)]
    first_row_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = TableConfig::default();
    if let Some(fields) = args.container {
        config.container_fields = fields.split(',').map(|s| s.trim().to_string()).collect();
    }
    if args.first_row_only {
        config.header_policy = HeaderPolicy::FirstRowOnly;
    }

    let document = read_document(args.input.as_deref())?;
    let workbook = workbook_from_value(document, &args.group_by, &config)?;

    if let Some(dir) = args.output_dir {
        let writer = WorkbookWriter::new(&dir)?;
        writer.write_workbook(&workbook)?;
    } else {
        let stdout = std::io::stdout();
        let mut writer = SingleWriter::new(stdout.lock());
        writer.write_workbook(&workbook)?;
        writer.flush()?;
    }

    Ok(())
}

/// Read the whole document, trying SIMD-accelerated parsing first and
/// falling back to serde_json so parse failures carry its diagnostic.
fn read_document(input: Option<&str>) -> Result<Value> {
    let mut content = Vec::new();
    if let Some(path) = input {
        let file = File::open(path).with_context(|| format!("Failed to open file: {}", path))?;
        BufReader::new(file)
            .read_to_end(&mut content)
            .context("Failed to read input")?;
    } else {
        std::io::stdin()
            .read_to_end(&mut content)
            .context("Failed to read stdin")?;
    }

    let mut simd_buf = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut simd_buf) {
        Ok(value) => Ok(value),
        Err(_) => {
            let text = String::from_utf8_lossy(&content);
            Ok(sheetmill::parse_document(&text)?)
        }
    }
}
