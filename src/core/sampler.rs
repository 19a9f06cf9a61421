//sampler.rs

use crate::core::depth_index::DepthIndex;
use crate::region::Region;

/// Depth at every position of `region`, in increasing position order.
///
/// The result has exactly `region.len()` values; element i is
/// `index.count_at(region.start + i)`.
pub fn sample(index: &DepthIndex, region: &Region) -> Vec<u32> {
    index.depth_over(region.start, region.end)
}
