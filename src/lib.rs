//! json-groupby
//!
//! Partition a collection of JSON records into nested groups keyed by
//! one or more record properties. Each grouping level is either
//! categorical (bucket by exact value, with multi-membership for
//! array-valued properties) or range (bucket by which sorted numeric
//! interval the value falls into). Optionally collect named property
//! values per leaf group and/or flatten the top level into an ordered
//! array of `{key, values}` entries.
//!
//! Groups alias the original records; nothing is cloned except the
//! scalar values gathered by the collector. The whole pipeline is a
//! pure, synchronous, in-memory transformation.
//!
//! ```
//! use json_groupby::{group_by, PropertySpec};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({ "id": 1, "color": "green" }),
//!     json!({ "id": 2, "color": "yellow" }),
//!     json!({ "id": 3, "color": "red" }),
//!     json!({ "id": 4, "color": "yellow" }),
//! ];
//!
//! let result = group_by(
//!     &records,
//!     &[PropertySpec::categorical("color")],
//!     Some(&["id".to_string()]),
//!     false,
//! ).unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&result).unwrap(),
//!     json!({
//!         "green": { "id": [1] },
//!         "yellow": { "id": [2, 4] },
//!         "red": { "id": [3] },
//!     })
//! );
//! ```

mod bucket;
mod collector;
mod error;
mod group;
mod present;
mod resolver;
mod spec;

// Re-export the public surface
pub use bucket::bucket_index;
pub use collector::{CollectedMap, CollectedTree};
pub use error::{GroupError, ResolveError};
pub use group::{GroupKey, GroupMap, GroupTree};
pub use present::PresentedEntry;
pub use resolver::resolve;
pub use spec::{PropertySpec, RangeSpec};

use log::debug;
use serde::Serialize;
use serde_json::Value;

/// Result of the grouping pipeline
///
/// One variant per output shape the pipeline can produce, depending on
/// which optional stages ran. Serializes to the same JSON in every
/// case: plain items, nested objects, or an array of `{key, values}`
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Grouped<'a> {
    /// Identity: no specifications were given, the input passes through
    Items(&'a [Value]),
    /// Nested group tree keyed by group key
    Tree(GroupMap<'a>),
    /// Group tree with leaves replaced by collected value tables
    Collected(CollectedMap),
    /// Top level of a group tree flattened into ordered entries
    TreeEntries(Vec<PresentedEntry<GroupTree<'a>>>),
    /// Top level of a collected tree flattened into ordered entries
    CollectedEntries(Vec<PresentedEntry<CollectedTree>>),
}

impl<'a> Grouped<'a> {
    /// Group tree, if grouping ran without collection or presentation
    pub fn as_tree(&self) -> Option<&GroupMap<'a>> {
        match self {
            Grouped::Tree(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Collected tree, if the collector ran without presentation
    pub fn as_collected(&self) -> Option<&CollectedMap> {
        match self {
            Grouped::Collected(nodes) => Some(nodes),
            _ => None,
        }
    }
}

/// Group records by a sequence of property specifications
///
/// **Public** - the single entry point of the crate.
///
/// # Arguments
/// * `items` - records to group; groups hold references into this slice
/// * `specs` - one grouping level per specification; empty means identity
/// * `collect` - property paths whose values replace each leaf's records;
///   `None` or empty passes the grouping through uncollected
/// * `as_array` - flatten the top level into ordered `{key, values}` entries
///
/// # Errors
/// * `GroupError::Resolve` - a path could not be traversed on some record;
///   the whole call fails, no partial result is returned
/// * `GroupError::NonNumericRangeValue` - a range level hit a value that
///   is not a number
pub fn group_by<'a>(
    items: &'a [Value],
    specs: &[PropertySpec],
    collect: Option<&[String]>,
    as_array: bool,
) -> Result<Grouped<'a>, GroupError> {
    let Some((first, rest)) = specs.split_first() else {
        debug!("no property specifications, returning items unchanged");
        return Ok(Grouped::Items(items));
    };

    debug!(
        "grouping {} record(s) by {} specification(s)",
        items.len(),
        specs.len()
    );
    let nodes = group::group_level(items.iter().collect(), first, rest)?;

    let paths = collect.unwrap_or_default();
    if !paths.is_empty() {
        debug!("collecting values for {} path(s) per leaf group", paths.len());
        let collected = collector::collect_tree(nodes, paths)?;
        return Ok(if as_array {
            Grouped::CollectedEntries(present::to_entries(collected))
        } else {
            Grouped::Collected(collected)
        });
    }

    Ok(if as_array {
        Grouped::TreeEntries(present::to_entries(nodes))
    } else {
        Grouped::Tree(nodes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({ "id": 1, "color": "green" }),
            json!({ "id": 2, "color": "yellow" }),
            json!({ "id": 3, "color": "red" }),
            json!({ "id": 4, "color": "yellow" }),
        ]
    }

    #[test]
    fn test_empty_specs_is_identity() {
        let items = records();
        let result = group_by(&items, &[], None, false).unwrap();
        match result {
            Grouped::Items(passed) => {
                assert_eq!(passed.len(), items.len());
                assert!(std::ptr::eq(passed.as_ptr(), items.as_ptr()));
            }
            _ => panic!("expected identity output"),
        }
    }

    #[test]
    fn test_empty_specs_ignores_as_array() {
        let items = records();
        let result = group_by(&items, &[], None, true).unwrap();
        assert!(matches!(result, Grouped::Items(_)));
    }

    #[test]
    fn test_collect_empty_list_passes_grouping_through() {
        let items = records();
        let result = group_by(
            &items,
            &[PropertySpec::categorical("color")],
            Some(&[]),
            false,
        )
        .unwrap();
        assert!(result.as_tree().is_some());
    }

    #[test]
    fn test_end_to_end_collected_object_output() {
        let items = records();
        let result = group_by(
            &items,
            &[PropertySpec::categorical("color")],
            Some(&["id".to_string()]),
            false,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "green": { "id": [1] },
                "yellow": { "id": [2, 4] },
                "red": { "id": [3] },
            })
        );
    }

    #[test]
    fn test_end_to_end_collected_array_output() {
        let items = records();
        let result = group_by(
            &items,
            &[PropertySpec::categorical("color")],
            Some(&["id".to_string()]),
            true,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!([
                { "key": "green", "values": { "id": [1] } },
                { "key": "yellow", "values": { "id": [2, 4] } },
                { "key": "red", "values": { "id": [3] } },
            ])
        );
    }

    #[test]
    fn test_presenter_round_trip_rebuilds_tree() {
        let items = records();
        let tree =
            group_by(&items, &[PropertySpec::categorical("color")], None, false).unwrap();
        let entries =
            group_by(&items, &[PropertySpec::categorical("color")], None, true).unwrap();

        let Grouped::Tree(nodes) = tree else {
            panic!("expected tree output")
        };
        let Grouped::TreeEntries(entries) = entries else {
            panic!("expected entries output")
        };

        let rebuilt: GroupMap<'_> = entries
            .into_iter()
            .map(|entry| (entry.key, entry.values))
            .collect();
        assert_eq!(rebuilt, nodes);
        let rebuilt_keys: Vec<&GroupKey> = rebuilt.keys().collect();
        let original_keys: Vec<&GroupKey> = nodes.keys().collect();
        assert_eq!(rebuilt_keys, original_keys);
    }
}
