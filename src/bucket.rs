//! Range bucketing via binary search over sorted boundaries.

/// Find the bucket a value falls into
///
/// **Public** - used by the grouping engine for range levels
///
/// # Arguments
/// * `value` - the numeric property value
/// * `intervals` - ascending boundaries; `k` boundaries define `k - 1`
///   buckets, indices `0..k-2`. Must be non-empty: the engine
///   short-circuits empty interval lists before calling this.
///
/// # Returns
/// The largest index `i` with `intervals[i] <= value`, clamped so that
/// values at or beyond the last boundary land in the last bucket and
/// values below the first boundary land in bucket 0. A value equal to a
/// boundary falls into the bucket that starts at that boundary.
pub fn bucket_index(value: f64, intervals: &[f64]) -> usize {
    let index = intervals
        .partition_point(|boundary| *boundary <= value)
        .saturating_sub(1);

    // The last boundary closes the final bucket, it does not open a new one.
    if index + 1 == intervals.len() {
        index.saturating_sub(1)
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVALS: [f64; 4] = [10.0, 20.0, 40.0, 50.0];

    #[test]
    fn test_value_inside_bucket() {
        assert_eq!(bucket_index(15.0, &INTERVALS), 0);
        assert_eq!(bucket_index(39.0, &INTERVALS), 1);
        assert_eq!(bucket_index(44.0, &INTERVALS), 2);
    }

    #[test]
    fn test_value_on_boundary_opens_that_bucket() {
        assert_eq!(bucket_index(10.0, &INTERVALS), 0);
        assert_eq!(bucket_index(20.0, &INTERVALS), 1);
        assert_eq!(bucket_index(40.0, &INTERVALS), 2);
    }

    #[test]
    fn test_last_boundary_clamps_into_final_bucket() {
        assert_eq!(bucket_index(50.0, &INTERVALS), 2);
        assert_eq!(bucket_index(100.0, &INTERVALS), 2);
    }

    #[test]
    fn test_value_below_first_boundary_clamps_to_zero() {
        assert_eq!(bucket_index(5.0, &INTERVALS), 0);
    }

    #[test]
    fn test_two_boundaries_single_bucket() {
        assert_eq!(bucket_index(-1.0, &[0.0, 30.0]), 0);
        assert_eq!(bucket_index(12.0, &[0.0, 30.0]), 0);
        assert_eq!(bucket_index(30.0, &[0.0, 30.0]), 0);
        assert_eq!(bucket_index(99.0, &[0.0, 30.0]), 0);
    }
}
