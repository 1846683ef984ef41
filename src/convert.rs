//! Conversion entry points
//!
//! Assembles the full pipeline: parse -> flatten -> resolve headers ->
//! optionally partition and summarize. The resulting `Table` and `Workbook`
//! values are the input contract for downstream renderers; this crate
//! itself never produces spreadsheet bytes.

use crate::error::ConvertError;
use crate::flatten::{
    resolve_headers, CellValue, FlatRow, FlattenOutput, JsonFlattener, TableConfig,
};
use crate::group::{partition, sheet_name, summarize, Summary};
use serde_json::Value;

/// A single-sheet conversion result
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<FlatRow>,
}

/// One sheet of a grouped conversion result
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<FlatRow>,
}

/// A grouped conversion result: ordered sheets plus summary statistics
#[derive(Debug, Clone)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    pub summary: Summary,
}

/// Name of the trailing sheet holding rows whose grouping column is absent
pub const UNGROUPED_SHEET: &str = "Ungrouped";

/// Parse a JSON document, surfacing the parser's diagnostic on failure.
pub fn parse_document(text: &str) -> Result<Value, ConvertError> {
    Ok(serde_json::from_str(text)?)
}

/// Convert a parsed document into a single table.
pub fn table_from_value(root: Value, config: &TableConfig) -> Result<Table, ConvertError> {
    let flattener = JsonFlattener::new(config.clone());
    let FlattenOutput { mut rows, first_row_paths } = flattener.flatten(root);

    if rows.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let headers = resolve_headers(&first_row_paths, &rows, config.header_policy);
    pad_rows(&headers, &mut rows);

    Ok(Table { headers, rows })
}

/// Convert JSON text into a single table.
pub fn convert_to_table(text: &str, config: &TableConfig) -> Result<Table, ConvertError> {
    table_from_value(parse_document(text)?, config)
}

/// Convert a parsed document into a workbook grouped by one column.
///
/// One sheet per group in ascending key order, then an "Ungrouped" sheet
/// when rows lack the column entirely. Sheet names are sanitized group
/// keys; the summary keeps the raw keys.
pub fn workbook_from_value(
    root: Value,
    group_by: &str,
    config: &TableConfig,
) -> Result<Workbook, ConvertError> {
    let flattener = JsonFlattener::new(config.clone());
    let FlattenOutput { rows, .. } = flattener.flatten(root);

    if rows.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let (groups, ungrouped) = partition(rows, group_by);
    let summary = summarize(&groups, ungrouped.len());

    let mut sheets = Vec::with_capacity(groups.len() + 1);
    for group in groups {
        sheets.push(build_sheet(sheet_name(&group.key), group.rows, config));
    }
    if !ungrouped.is_empty() {
        sheets.push(build_sheet(UNGROUPED_SHEET.to_string(), ungrouped, config));
    }

    Ok(Workbook { sheets, summary })
}

/// Convert JSON text into a grouped workbook.
pub fn convert_to_workbook(
    text: &str,
    group_by: &str,
    config: &TableConfig,
) -> Result<Workbook, ConvertError> {
    workbook_from_value(parse_document(text)?, group_by, config)
}

/// Resolve headers from a sheet's own rows (its first row is the primary
/// order) and pad the rows rectangular.
fn build_sheet(name: String, mut rows: Vec<FlatRow>, config: &TableConfig) -> Sheet {
    let primary: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let headers = resolve_headers(&primary, &rows, config.header_policy);
    pad_rows(&headers, &mut rows);

    Sheet { name, headers, rows }
}

/// Give every row an Empty cell for each resolved column it lacks, so the
/// renderer receives rectangular data.
fn pad_rows(headers: &[String], rows: &mut [FlatRow]) {
    for row in rows.iter_mut() {
        for header in headers {
            if !row.contains_key(header) {
                row.insert(header.clone(), CellValue::Empty);
            }
        }
    }
}
