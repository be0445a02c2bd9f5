//! Error types for the grouping pipeline.
//!
//! We use `thiserror` for typed library errors. Resolution failures are
//! fail-fast: the whole `group_by` call aborts with no partial result,
//! and the caller decides whether to recover.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while resolving a dotted property path on a record
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("property path '{path}' cannot be resolved: segment '{segment}' not found")]
    MissingSegment { path: String, segment: String },
}

/// Errors that can occur while grouping or collecting
#[derive(Error, Debug)]
pub enum GroupError {
    /// A property path could not be traversed on some record.
    /// Propagates the resolver error unchanged.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("range property '{path}' resolved to non-numeric value: {value}")]
    NonNumericRangeValue { path: String, value: Value },
}
