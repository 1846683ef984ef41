use crate::flatten::types::{FlatRow, HeaderPolicy};
use std::collections::{BTreeSet, HashSet};

/// Derive the final column list for a set of rows.
///
/// The primary list (first-row discovery order) is kept verbatim; column
/// paths that only appear in later rows are appended in ascending ordinal
/// order so optional and variant fields get a deterministic trailing
/// position. Under `FirstRowOnly` the trailing columns are dropped instead.
pub fn resolve_headers(
    primary: &[String],
    rows: &[FlatRow],
    policy: HeaderPolicy,
) -> Vec<String> {
    let mut headers: Vec<String> = primary.to_vec();

    if policy == HeaderPolicy::FirstRowOnly {
        return headers;
    }

    let seen: HashSet<&str> = headers.iter().map(|h| h.as_str()).collect();
    let trailing: BTreeSet<&String> = rows
        .iter()
        .flat_map(|row| row.keys())
        .filter(|path| !seen.contains(path.as_str()))
        .collect();

    headers.extend(trailing.into_iter().cloned());
    headers
}
