//! # Sheetmill - JSON to Tabular Conversion
//!
//! A library for converting semi-structured JSON documents (including
//! deeply nested, array-bearing export dumps) into tabular sheet data with
//! stable column ordering and typed cells.
//!
//! ## Modules
//!
//! - **flatten**: recursive flattening, header resolution, cell coercion
//! - **group**: partition rows into named groups with summary statistics
//! - **convert**: end-to-end conversion entry points
//! - **writer**: JSON Lines writers consuming the tabular output
//!
//! ## Quick Start
//!
//! ### Single table
//!
//! ```rust
//! use sheetmill::{convert_to_table, TableConfig};
//!
//! # fn main() -> Result<(), sheetmill::ConvertError> {
//! let json = r#"[
//!     {"id": 1, "address": {"city": "Oslo"}},
//!     {"id": 2, "address": {"city": "Bergen"}}
//! ]"#;
//!
//! let table = convert_to_table(json, &TableConfig::default())?;
//!
//! assert_eq!(table.headers, vec!["id", "address.city"]);
//! assert_eq!(table.rows.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Grouped workbook
//!
//! ```rust
//! use sheetmill::{convert_to_workbook, TableConfig};
//!
//! # fn main() -> Result<(), sheetmill::ConvertError> {
//! let json = r#"[
//!     {"region": "EU", "id": 1},
//!     {"region": "US", "id": 2},
//!     {"region": "EU", "id": 3}
//! ]"#;
//!
//! let workbook = convert_to_workbook(json, "region", &TableConfig::default())?;
//!
//! // One sheet per region, ascending by key, plus summary counts
//! assert_eq!(workbook.sheets.len(), 2);
//! assert_eq!(workbook.sheets[0].name, "EU");
//! assert_eq!(workbook.summary.total, 3);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::Read;

pub mod convert;
pub mod error;
pub mod flatten;
pub mod group;
pub mod writer;

// Re-export commonly used types for convenience
pub use convert::{
    convert_to_table, convert_to_workbook, parse_document, table_from_value,
    workbook_from_value, Sheet, Table, Workbook, UNGROUPED_SHEET,
};
pub use error::ConvertError;
pub use flatten::{
    coerce, resolve_headers, CellValue, FlatRow, FlattenOutput, HeaderPolicy, JsonFlattener,
    TableConfig,
};
pub use group::{partition, sheet_name, summarize, Group, GroupCount, Summary, UNKNOWN_KEY};
pub use writer::{SingleWriter, TableWriter, WorkbookWriter};

/// Main entry point: read a whole JSON document from `reader` and convert
/// it into a single table.
pub fn table_from_reader<R: Read>(mut reader: R, config: &TableConfig) -> Result<Table> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read input")?;

    Ok(convert_to_table(&text, config)?)
}
