//! Collection of property values across each leaf group.
//!
//! Replaces every leaf's record list with a table mapping each requested
//! property path to the values resolved for it across the leaf's records,
//! in record-then-value order.

use crate::error::GroupError;
use crate::group::{GroupKey, GroupMap, GroupTree};
use crate::resolver::resolve;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// One level of a collected tree, key order carried over from grouping
pub type CollectedMap = IndexMap<GroupKey, CollectedTree>;

/// A node of the collected tree
///
/// Mirrors [`GroupTree`](crate::GroupTree), with leaves replaced by the
/// collected value tables. Collected values are owned clones; the
/// original records stay untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectedTree {
    /// Requested path -> values resolved across the leaf's records
    Leaf(IndexMap<String, Vec<Value>>),
    /// Further grouping levels below this bucket
    Node(CollectedMap),
}

impl CollectedTree {
    /// Value table of a leaf, if this node is one
    pub fn as_leaf(&self) -> Option<&IndexMap<String, Vec<Value>>> {
        match self {
            CollectedTree::Leaf(table) => Some(table),
            CollectedTree::Node(_) => None,
        }
    }

    /// Child buckets of an internal node, if this node is one
    pub fn as_node(&self) -> Option<&CollectedMap> {
        match self {
            CollectedTree::Leaf(_) => None,
            CollectedTree::Node(children) => Some(children),
        }
    }
}

/// Collect property values for every leaf under a grouping level
///
/// Internal nodes recurse with key order preserved; resolution failures
/// propagate out unchanged.
pub(crate) fn collect_tree(
    nodes: GroupMap<'_>,
    paths: &[String],
) -> Result<CollectedMap, GroupError> {
    let mut collected = CollectedMap::with_capacity(nodes.len());
    for (key, tree) in nodes {
        let node = match tree {
            GroupTree::Leaf(records) => CollectedTree::Leaf(collect_leaf(&records, paths)?),
            GroupTree::Node(children) => CollectedTree::Node(collect_tree(children, paths)?),
        };
        collected.insert(key, node);
    }
    Ok(collected)
}

/// Build the value table for one leaf
///
/// Records are scanned in leaf order; each record contributes all of its
/// resolved values for a path before the next record is visited.
fn collect_leaf(
    records: &[&Value],
    paths: &[String],
) -> Result<IndexMap<String, Vec<Value>>, GroupError> {
    let mut table: IndexMap<String, Vec<Value>> = IndexMap::with_capacity(paths.len());
    for record in records {
        for path in paths {
            let values = resolve(record, path)?;
            table
                .entry(path.clone())
                .or_default()
                .extend(values.into_iter().cloned());
        }
    }
    Ok(table)
}
