use crate::flatten::FlatRow;
use std::collections::BTreeMap;

/// Literal bucket key for rows whose grouping cell is present but blank.
/// Rows where the column is entirely absent are ungrouped instead.
pub const UNKNOWN_KEY: &str = "Unknown";

/// A named bucket of rows sharing one grouping value
#[derive(Debug, Clone)]
pub struct Group {
    pub key: String,
    pub rows: Vec<FlatRow>,
}

/// Partition rows by the textual value of `group_by`.
///
/// Returns the groups in ascending key order and the rows that lack the
/// column, both preserving the original relative row order. Every input
/// row lands in exactly one of the two outputs.
pub fn partition(rows: Vec<FlatRow>, group_by: &str) -> (Vec<Group>, Vec<FlatRow>) {
    let mut buckets: BTreeMap<String, Vec<FlatRow>> = BTreeMap::new();
    let mut ungrouped = Vec::new();

    for row in rows {
        let rendered = row.get(group_by).map(|cell| cell.to_string());
        match rendered {
            None => ungrouped.push(row),
            Some(text) => {
                let key = if text.trim().is_empty() {
                    UNKNOWN_KEY.to_string()
                } else {
                    text
                };
                buckets.entry(key).or_default().push(row);
            }
        }
    }

    let groups = buckets
        .into_iter()
        .map(|(key, rows)| Group { key, rows })
        .collect();

    (groups, ungrouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{JsonFlattener, TableConfig};
    use serde_json::{json, Value};

    fn rows_of(value: Value) -> Vec<FlatRow> {
        JsonFlattener::new(TableConfig::default()).flatten(value).rows
    }

    #[test]
    fn test_one_group_per_distinct_value() {
        let rows = rows_of(json!([
            {"a": 1, "b": {"c": 2}},
            {"a": 3, "b": {"d": 4}}
        ]));

        let (groups, ungrouped) = partition(rows, "a");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "1");
        assert_eq!(groups[1].key, "3");
        assert_eq!(groups[0].rows.len(), 1);
        assert_eq!(groups[1].rows.len(), 1);
        assert!(ungrouped.is_empty());
    }

    #[test]
    fn test_groups_sorted_by_key() {
        let rows = rows_of(json!([
            {"region": "US"},
            {"region": "EU"},
            {"region": "APAC"},
            {"region": "EU"}
        ]));

        let (groups, _) = partition(rows, "region");

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["APAC", "EU", "US"]);
        assert_eq!(groups[1].rows.len(), 2);
    }

    #[test]
    fn test_absent_column_goes_ungrouped() {
        let rows = rows_of(json!([
            {"region": "EU", "id": 1},
            {"id": 2},
            {"region": "EU", "id": 3},
            {"id": 4}
        ]));

        let (groups, ungrouped) = partition(rows, "region");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(ungrouped.len(), 2);
        // Original relative order survives
        assert_eq!(ungrouped[0].get("id").unwrap().to_string(), "2");
        assert_eq!(ungrouped[1].get("id").unwrap().to_string(), "4");
    }

    #[test]
    fn test_blank_value_buckets_as_unknown() {
        let rows = rows_of(json!([
            {"region": "", "id": 1},
            {"region": null, "id": 2},
            {"id": 3}
        ]));

        let (groups, ungrouped) = partition(rows, "region");

        // Present-but-blank lands in "Unknown"; absent stays ungrouped
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, UNKNOWN_KEY);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(ungrouped.len(), 1);
    }

    #[test]
    fn test_partition_invariant() {
        let rows = rows_of(json!([
            {"g": "x"}, {"g": "y"}, {"id": 1}, {"g": "x"}, {"g": ""}
        ]));
        let total = rows.len();

        let (groups, ungrouped) = partition(rows, "g");
        let grouped: usize = groups.iter().map(|g| g.rows.len()).sum();

        assert_eq!(grouped + ungrouped.len(), total);
    }

    #[test]
    fn test_row_order_within_group() {
        let rows = rows_of(json!([
            {"g": "x", "id": 1},
            {"g": "y", "id": 2},
            {"g": "x", "id": 3}
        ]));

        let (groups, _) = partition(rows, "g");

        let ids: Vec<String> = groups[0]
            .rows
            .iter()
            .map(|r| r.get("id").unwrap().to_string())
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }
}
