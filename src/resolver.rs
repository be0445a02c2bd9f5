//! Dotted property path resolution on JSON records.
//!
//! Paths like `vendor.address.city` are traversed segment by segment.
//! Arrays encountered anywhere along the way are descended element-wise,
//! so a single path may resolve to zero, one, or many values.

use crate::error::ResolveError;
use serde_json::Value;

/// Resolve a dotted property path against a record
///
/// **Public** - the grouping engine and collector both read records
/// exclusively through this function.
///
/// # Arguments
/// * `record` - JSON value to traverse (normally an object)
/// * `path` - Dotted property path, e.g. `"vendor.address.city"`
///
/// # Returns
/// Every value found at the path, in traversal order. A singular value
/// comes back as a one-element vector; an array-valued field contributes
/// each of its elements.
///
/// # Errors
/// * `ResolveError::MissingSegment` - some segment of the path is absent
///   on the value being traversed
pub fn resolve<'a>(record: &'a Value, path: &str) -> Result<Vec<&'a Value>, ResolveError> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut matches = Vec::new();
    walk(record, &segments, path, &mut matches)?;
    Ok(matches)
}

/// Recursive traversal step
///
/// **Private** - arrays are transparent: they never consume a path
/// segment, each element is visited with the same remaining segments.
fn walk<'a>(
    value: &'a Value,
    segments: &[&str],
    path: &str,
    matches: &mut Vec<&'a Value>,
) -> Result<(), ResolveError> {
    if let Value::Array(elements) = value {
        for element in elements {
            walk(element, segments, path, matches)?;
        }
        return Ok(());
    }

    match segments.split_first() {
        None => {
            matches.push(value);
            Ok(())
        }
        Some((segment, rest)) => match value.get(*segment) {
            Some(next) => walk(next, rest, path, matches),
            None => Err(ResolveError::MissingSegment {
                path: path.to_string(),
                segment: (*segment).to_string(),
            }),
        },
    }
}
