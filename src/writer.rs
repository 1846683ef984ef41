//! JSON Lines writers for tabular output
//!
//! These consume the renderer input contract (headers plus rows of typed
//! cells) and emit JSON text: one object per row with every resolved
//! column present. Spreadsheet byte formats stay outside this crate.

use crate::convert::{Sheet, Table, Workbook};
use crate::flatten::{CellValue, FlatRow};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Build the JSON record for one row, in header order. Columns the row
/// lacks render as null.
fn row_record(headers: &[String], row: &FlatRow) -> Result<Map<String, Value>> {
    let mut record = Map::new();
    for header in headers {
        let cell = row.get(header).unwrap_or(&CellValue::Empty);
        let value = serde_json::to_value(cell).context("Failed to serialize cell")?;
        record.insert(header.clone(), value);
    }
    Ok(record)
}

/// Writes a table as JSON Lines, one object per row
pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter { writer }
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for row in &table.rows {
            let record = row_record(&table.headers, row)?;
            let json = serde_json::to_string(&record).context("Failed to serialize row")?;
            writeln!(self.writer, "{}", json).context("Failed to write row")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

/// Writes each sheet of a workbook to its own .jsonl file in a directory,
/// plus a summary.json with the per-group counts
pub struct WorkbookWriter {
    output_dir: PathBuf,
}

impl WorkbookWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        std::fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

        Ok(WorkbookWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }

    pub fn write_workbook(&self, workbook: &Workbook) -> Result<()> {
        for sheet in &workbook.sheets {
            self.write_sheet(sheet)?;
        }

        let path = self.output_dir.join("summary.json");
        let json = serde_json::to_string_pretty(&workbook.summary)
            .context("Failed to serialize summary")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        Ok(())
    }

    fn write_sheet(&self, sheet: &Sheet) -> Result<()> {
        let path = self.output_dir.join(format!("{}.jsonl", sheet.name));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);

        for row in &sheet.rows {
            let record = row_record(&sheet.headers, row)?;
            let json = serde_json::to_string(&record).context("Failed to serialize row")?;
            writeln!(writer, "{}", json).context("Failed to write row")?;
        }

        writer.flush().context("Failed to flush writer")
    }
}

/// Streams a whole workbook to a single output: every row carries a
/// `_sheet` metadata field, and a final `_summary` record closes the stream
pub struct SingleWriter<W: Write> {
    writer: W,
}

impl<W: Write> SingleWriter<W> {
    pub fn new(writer: W) -> Self {
        SingleWriter { writer }
    }

    pub fn write_workbook(&mut self, workbook: &Workbook) -> Result<()> {
        for sheet in &workbook.sheets {
            for row in &sheet.rows {
                let mut record = row_record(&sheet.headers, row)?;
                record.insert("_sheet".to_string(), Value::String(sheet.name.clone()));

                let json = serde_json::to_string(&record).context("Failed to serialize row")?;
                writeln!(self.writer, "{}", json).context("Failed to write row")?;
            }
        }

        let mut tail = Map::new();
        tail.insert(
            "_summary".to_string(),
            serde_json::to_value(&workbook.summary).context("Failed to serialize summary")?,
        );
        let json = serde_json::to_string(&tail).context("Failed to serialize summary")?;
        writeln!(self.writer, "{}", json).context("Failed to write summary")?;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{convert_to_table, convert_to_workbook};
    use crate::flatten::TableConfig;

    #[test]
    fn test_table_writer_emits_null_for_empty() {
        let table = convert_to_table(
            r#"[{"a": 1}, {"a": 2, "b": 3}]"#,
            &TableConfig::default(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        let mut writer = TableWriter::new(&mut buffer);
        writer.write_table(&table).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"a":1,"b":null}"#);
        assert_eq!(lines[1], r#"{"a":2,"b":3}"#);
    }

    #[test]
    fn test_single_writer_metadata() {
        let workbook = convert_to_workbook(
            r#"[{"region": "EU", "id": 1}, {"id": 2}]"#,
            "region",
            &TableConfig::default(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        let mut writer = SingleWriter::new(&mut buffer);
        writer.write_workbook(&workbook).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains(r#""_sheet":"EU""#));
        assert!(output.contains(r#""_sheet":"Ungrouped""#));
        assert!(output.lines().last().unwrap().contains("_summary"));
        assert!(output.contains(r#""total":2"#));
    }
}
