//! Presentation of a grouping level as an ordered array of entries.

use crate::group::GroupKey;
use indexmap::IndexMap;
use serde::Serialize;

/// One `{key, values}` entry of the presented top level
///
/// Generic over the subtree type so both grouped and collected output
/// can be presented.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedEntry<T> {
    pub key: GroupKey,
    pub values: T,
}

/// Flatten one grouping level into entries, first-encounter order
///
/// Applies to the top level only: each bound subtree is moved into its
/// entry verbatim, nested levels are never flattened further.
pub(crate) fn to_entries<T>(nodes: IndexMap<GroupKey, T>) -> Vec<PresentedEntry<T>> {
    nodes
        .into_iter()
        .map(|(key, values)| PresentedEntry { key, values })
        .collect()
}
