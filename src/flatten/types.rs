use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Output format for DateTime cells.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed spreadsheet cell produced by coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value (JSON null, or a column the row never produced)
    Empty,
    Boolean(bool),
    Integer64(i64),
    Decimal(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Textual rendering. Used for grouping keys and plain-text output;
/// Empty renders as the empty string.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer64(i) => write!(f, "{}", i),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// JSON rendering for the writers: Empty becomes null, DateTime a
/// formatted string, everything else its native JSON type.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_unit(),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Integer64(i) => serializer.serialize_i64(*i),
            CellValue::Decimal(d) => serializer.serialize_f64(*d),
            CellValue::DateTime(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One output row: column path -> typed cell.
///
/// Key order reflects discovery order during flattening; re-inserting an
/// existing path overwrites the value but keeps the original position.
pub type FlatRow = IndexMap<String, CellValue>;

/// How columns discovered after the first row are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// First-row order, then remaining columns appended in ascending order
    FirstRowThenSorted,
    /// Only the columns present in the first row
    FirstRowOnly,
}

/// Configuration for the flattening process
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Top-level array fields that define the row source, checked in order
    pub container_fields: Vec<String>,

    /// Ordering policy for trailing columns
    pub header_policy: HeaderPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            container_fields: vec![String::from("Documents"), String::from("items")],
            header_policy: HeaderPolicy::FirstRowThenSorted,
        }
    }
}
