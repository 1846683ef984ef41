use crate::flatten::coerce::coerce;
use crate::flatten::types::{FlatRow, TableConfig};
use serde_json::Value;

/// Result of flattening one document: the rows, plus the column paths of
/// the first row in discovery order (the primary header order).
#[derive(Debug)]
pub struct FlattenOutput {
    pub rows: Vec<FlatRow>,
    pub first_row_paths: Vec<String>,
}

/// The core flattener that turns a JSON document into flat tabular rows
pub struct JsonFlattener {
    config: TableConfig,
}

impl JsonFlattener {
    pub fn new(config: TableConfig) -> Self {
        JsonFlattener { config }
    }

    /// Flatten a JSON document into one row per row source.
    ///
    /// Row sources are the elements of a recognized container field, the
    /// elements of a root array, or the root value itself.
    pub fn flatten(&self, root: Value) -> FlattenOutput {
        let sources = self.row_sources(root);

        let mut rows = Vec::with_capacity(sources.len());
        for source in sources {
            let mut row = FlatRow::new();
            flatten_value(source, "", &mut row);
            rows.push(row);
        }

        let first_row_paths = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        FlattenOutput { rows, first_row_paths }
    }

    /// Pick the row sources for a document root.
    fn row_sources(&self, root: Value) -> Vec<Value> {
        match root {
            Value::Object(mut obj) => {
                for field in &self.config.container_fields {
                    if matches!(obj.get(field), Some(Value::Array(_))) {
                        if let Some(Value::Array(elements)) = obj.remove(field) {
                            return elements;
                        }
                    }
                }
                vec![Value::Object(obj)]
            }
            Value::Array(elements) => elements,
            scalar => vec![scalar],
        }
    }
}

/// Recursively record every terminal scalar under its full column path.
///
/// Object keys extend the path with `.key`, array indices with `[i]`.
/// A colliding path is overwritten in visitation order (last write wins).
fn flatten_value(value: Value, path: &str, row: &mut FlatRow) {
    match value {
        Value::Object(obj) => {
            for (key, child) in obj {
                let child_path = if path.is_empty() {
                    key
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_value(child, &child_path, row);
            }
        }
        Value::Array(elements) => {
            for (idx, child) in elements.into_iter().enumerate() {
                flatten_value(child, &format!("{}[{}]", path, idx), row);
            }
        }
        scalar => {
            let column = if path.is_empty() {
                // Bare scalar row source
                String::from("value")
            } else {
                path.to_string()
            };
            row.insert(column, coerce(scalar));
        }
    }
}
