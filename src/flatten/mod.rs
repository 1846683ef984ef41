//! JSON flattening - turn nested JSON documents into flat tabular rows
//!
//! This module handles the first half of a conversion: walking a document's
//! value tree into flat rows keyed by dotted/bracketed column paths,
//! coercing every terminal scalar into a typed cell, and deriving a stable
//! column order across heterogeneous rows.

pub mod coerce;
pub mod flattener;
pub mod headers;
pub mod types;

pub use coerce::{coerce, coerce_text};
pub use flattener::{FlattenOutput, JsonFlattener};
pub use headers::resolve_headers;
pub use types::{CellValue, FlatRow, HeaderPolicy, TableConfig};
