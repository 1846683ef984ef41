//! Row grouping - partition flat rows into named buckets with a summary
//!
//! Splits a row set by the value of one column into sorted groups plus an
//! ungrouped remainder, and computes the per-group statistics a summary
//! sheet is built from.

pub mod partition;
pub mod summary;

pub use partition::{partition, Group, UNKNOWN_KEY};
pub use summary::{sheet_name, summarize, GroupCount, Summary};
