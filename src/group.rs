//! The grouping engine: recursive multi-level partitioning of records.
//!
//! Each level partitions the records it receives by one property
//! specification, then recurses per bucket with the remaining
//! specifications. Buckets hold references to the original records,
//! never copies, in first-encounter key order.

use crate::bucket::bucket_index;
use crate::error::GroupError;
use crate::resolver::resolve;
use crate::spec::{PropertySpec, RangeSpec};
use indexmap::IndexMap;
use log::debug;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One level of a group tree, in first-encounter key order
pub type GroupMap<'a> = IndexMap<GroupKey, GroupTree<'a>>;

/// Key of one bucket: a categorical tag / range label, or a bare
/// range bucket index when no labels were supplied
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Tag(String),
    Bucket(usize),
}

impl GroupKey {
    /// Key for a categorical value: strings keep their text, everything
    /// else uses its compact JSON rendering (`true`, `44`, `null`)
    fn for_value(value: &Value) -> Self {
        match value {
            Value::String(text) => GroupKey::Tag(text.clone()),
            other => GroupKey::Tag(other.to_string()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Tag(tag) => f.write_str(tag),
            GroupKey::Bucket(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(tag: &str) -> Self {
        GroupKey::Tag(tag.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(tag: String) -> Self {
        GroupKey::Tag(tag)
    }
}

impl From<usize> for GroupKey {
    fn from(index: usize) -> Self {
        GroupKey::Bucket(index)
    }
}

impl Serialize for GroupKey {
    /// Tags serialize as strings, bucket indices as numbers. In JSON
    /// map-key position the index renders as its decimal string, which
    /// matches the object keys of the original JSON output.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupKey::Tag(tag) => serializer.serialize_str(tag),
            GroupKey::Bucket(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// A node of the group tree
///
/// The leaf/internal distinction is a variant tag: a leaf holds the
/// records of one fully-partitioned bucket, an internal node holds the
/// next grouping level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupTree<'a> {
    /// Records of one bucket, aliased from the caller's input slice
    Leaf(Vec<&'a Value>),
    /// Further grouping levels below this bucket
    Node(GroupMap<'a>),
}

impl<'a> GroupTree<'a> {
    /// Records of a leaf, if this node is one
    pub fn as_leaf(&self) -> Option<&[&'a Value]> {
        match self {
            GroupTree::Leaf(records) => Some(records),
            GroupTree::Node(_) => None,
        }
    }

    /// Child buckets of an internal node, if this node is one
    pub fn as_node(&self) -> Option<&GroupMap<'a>> {
        match self {
            GroupTree::Leaf(_) => None,
            GroupTree::Node(children) => Some(children),
        }
    }
}

/// Partition records by one specification, then recurse per bucket
///
/// `group_by` drives this with the first specification split off; an
/// exhausted spec list makes each bucket a leaf. Any resolution failure
/// aborts the whole call, no partial tree is returned.
pub(crate) fn group_level<'a>(
    items: Vec<&'a Value>,
    spec: &PropertySpec,
    rest: &[PropertySpec],
) -> Result<GroupMap<'a>, GroupError> {
    let buckets = match spec {
        PropertySpec::Categorical(path) => partition_by_category(items, path)?,
        PropertySpec::Range(range) => partition_by_range(items, range)?,
    };

    debug!(
        "partitioned into {} bucket(s), {} level(s) remaining",
        buckets.len(),
        rest.len()
    );

    let mut nodes = GroupMap::with_capacity(buckets.len());
    for (key, members) in buckets {
        let subtree = match rest.split_first() {
            None => GroupTree::Leaf(members),
            Some((next, tail)) => GroupTree::Node(group_level(members, next, tail)?),
        };
        nodes.insert(key, subtree);
    }
    Ok(nodes)
}

/// Bucket records by exact property value
///
/// A record whose property resolves to several values joins the bucket
/// of every value (multi-membership, not a single assignment).
fn partition_by_category<'a>(
    items: Vec<&'a Value>,
    path: &str,
) -> Result<IndexMap<GroupKey, Vec<&'a Value>>, GroupError> {
    let mut buckets: IndexMap<GroupKey, Vec<&'a Value>> = IndexMap::new();
    for item in items {
        for value in resolve(item, path)? {
            buckets
                .entry(GroupKey::for_value(value))
                .or_default()
                .push(item);
        }
    }
    Ok(buckets)
}

/// Bucket records by which interval their numeric property falls into
///
/// An empty interval list yields no buckets at all. A record whose
/// property resolves to zero values joins no bucket; the first resolved
/// value decides the bucket otherwise.
fn partition_by_range<'a>(
    items: Vec<&'a Value>,
    range: &RangeSpec,
) -> Result<IndexMap<GroupKey, Vec<&'a Value>>, GroupError> {
    let mut buckets: IndexMap<GroupKey, Vec<&'a Value>> = IndexMap::new();
    if range.intervals.is_empty() {
        return Ok(buckets);
    }

    for item in items {
        let values = resolve(item, &range.property)?;
        let Some(value) = values.first() else {
            continue;
        };
        let number = value
            .as_f64()
            .ok_or_else(|| GroupError::NonNumericRangeValue {
                path: range.property.clone(),
                value: (*value).clone(),
            })?;

        let index = bucket_index(number, &range.intervals);
        let key = match range.labels.as_ref().and_then(|labels| labels.get(index)) {
            Some(label) => GroupKey::Tag(label.clone()),
            None => GroupKey::Bucket(index),
        };
        buckets.entry(key).or_default().push(item);
    }
    Ok(buckets)
}
