//! sheetmill-flatten: Flatten a JSON document into a single table
//!
//! Usage:
//!   # Read from file, write JSON Lines to stdout
//!   sheetmill-flatten data.json
//!
//!   # Read from stdin
//!   cat export.json | sheetmill-flatten
//!
//!   # Custom container fields and strict first-row headers
//!   sheetmill-flatten dump.json --container Documents,records --first-row-only

// MiMalloc allocator, recommended by simd-json
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use sheetmill::{table_from_value, HeaderPolicy, TableConfig, TableWriter};
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "sheetmill-flatten")]
#[command(about = "Flatten a JSON document into a single table", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Comma-separated container fields checked at the document root
    #[arg(long)]
    container: Option<String>,

    /// Only emit columns present in the first row
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
    let table = table_from_value(document, &config)?;

    let stdout = std::io::stdout();
    let mut writer = TableWriter::new(stdout.lock());
    writer.write_table(&table)?;
    writer.flush()?;

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
