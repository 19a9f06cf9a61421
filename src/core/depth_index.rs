//depth_index.rs

use crate::core::aligned_interval::AlignedInterval;

/// Stabbing-count index over the aligned intervals of one (region, BAM file) pair.
///
/// Starts and ends are kept as two independently sorted vectors. The number of
/// intervals containing `p` is `#(first <= p) - #(last < p)`: every interval
/// that ends before `p` also started before it.
///
/// Point queries are O(log N). A contiguous range is answered in a single
/// O(N + R) difference-array sweep by [`DepthIndex::depth_over`].
#[derive(Clone, Debug, Default)]
pub struct DepthIndex {
    intervals: Vec<AlignedInterval>,
    starts: Vec<u64>,
    ends: Vec<u64>,
}

impl DepthIndex {

    /// Build the index; the input order does not matter.
    pub fn build(intervals: Vec<AlignedInterval>) -> Self {
        let mut starts: Vec<u64> = intervals.iter().map(|iv| iv.first).collect();
        let mut ends: Vec<u64> = intervals.iter().map(|iv| iv.last).collect();
        starts.sort_unstable();
        ends.sort_unstable();
        Self { intervals, starts, ends }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of intervals with first <= pos <= last.
    pub fn count_at(&self, pos: u64) -> u32 {
        let started = self.starts.partition_point(|&s| s <= pos);
        let ended = self.ends.partition_point(|&e| e < pos);
        (started - ended) as u32
    }

    /// Depth at every position of [start, end] (1-based, inclusive), in increasing order.
    ///
    /// Element i equals `count_at(start + i)`. Intervals reaching outside the
    /// range are clipped to it. An empty range (start > end) gives an empty vector.
    pub fn depth_over(&self, start: u64, end: u64) -> Vec<u32> {
        if start > end {
            return Vec::new();
        }
        let width = (end - start + 1) as usize;
        // one extra slot for the -1 of intervals that reach `end`
        let mut diff = vec![0_i64; width + 1];

        for iv in &self.intervals {
            if iv.last < start || iv.first > end {
                continue;
            }
            let from = iv.first.max(start) - start;
            let to = iv.last.min(end) - start;
            diff[from as usize] += 1;
            diff[to as usize + 1] -= 1;
        }

        let mut depth = 0_i64;
        diff.iter()
            .take(width)
            .map(|d| {
                depth += d;
                depth as u32
            })
            .collect()
    }
}
