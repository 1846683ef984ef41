use crate::group::partition::{Group, UNKNOWN_KEY};
use serde::Serialize;

/// Sheet name length limit imposed by spreadsheet formats
const SHEET_NAME_MAX: usize = 31;

/// Characters spreadsheet formats reject in sheet names
const SHEET_NAME_FORBIDDEN: [char; 7] = ['/', '\\', '?', '*', '[', ']', ':'];

/// Row count for one group, keyed by the raw (unsanitized) group key
#[derive(Debug, Clone, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub rows: usize,
}

/// Per-group counts plus totals for a grouped conversion
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub per_group: Vec<GroupCount>,
    pub ungrouped: usize,
    pub total: usize,
}

/// Compute per-group row counts and the total record count.
///
/// `total` always equals the row count handed to the partitioner, which
/// makes it a direct invariant check for callers.
pub fn summarize(groups: &[Group], ungrouped: usize) -> Summary {
    let per_group: Vec<GroupCount> = groups
        .iter()
        .map(|group| GroupCount {
            key: group.key.clone(),
            rows: group.rows.len(),
        })
        .collect();

    let total = per_group.iter().map(|g| g.rows).sum::<usize>() + ungrouped;

    Summary {
        per_group,
        ungrouped,
        total,
    }
}

/// Derive a legal sheet name from a group key: forbidden characters become
/// underscores and the result is cut to the format's length limit. Blank
/// keys render as "Unknown".
pub fn sheet_name(key: &str) -> String {
    if key.trim().is_empty() {
        return UNKNOWN_KEY.to_string();
    }

    key.chars()
        .map(|c| if SHEET_NAME_FORBIDDEN.contains(&c) { '_' } else { c })
        .take(SHEET_NAME_MAX)
        .collect()
}
