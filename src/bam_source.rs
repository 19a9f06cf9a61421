// src/bam_source.rs
use std::path::Path;

use rust_htslib::bam::{IndexedReader, Read};

use crate::core::aligned_interval::{record_to_interval, AlignedInterval};
use crate::core::alignment_policy::AlignmentPolicy;
use crate::error::{BamcoverError, Result};
use crate::region::Region;

/// Where the aligned reads of a region come from.
///
/// Implementations open the file, collect the intervals and release the file
/// again inside one call; nothing is kept open between calls.
pub trait AlignmentSource: Sync {
    /// All aligned intervals (1-based, inclusive) of reads overlapping `region`.
    fn intervals(&self, bam: &Path, region: &Region) -> Result<Vec<AlignedInterval>>;
}

/// Reads coordinate sorted, indexed BAM files with rust-htslib.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtsAlignmentSource {
    pub policy: AlignmentPolicy,
}

impl HtsAlignmentSource {
    pub fn new(policy: AlignmentPolicy) -> Self {
        Self { policy }
    }
}

impl AlignmentSource for HtsAlignmentSource {
    fn intervals(&self, bam: &Path, region: &Region) -> Result<Vec<AlignedInterval>> {
        let mut reader = IndexedReader::from_path(bam).map_err(|source| BamcoverError::BamOpen {
            path: bam.to_path_buf(),
            source,
        })?;

        // htslib wants 0-based half-open; [start-1, end) is exactly our 1-based [start, end]
        let (start0, end0) = region.to_zero_based_half_open();
        reader
            .fetch((region.chr.as_str(), start0, end0))
            .map_err(|source| BamcoverError::BamFetch {
                path: bam.to_path_buf(),
                region: region.to_string(),
                source,
            })?;

        let keep_all = self.policy.keeps_everything();
        let mut intervals = Vec::new();
        for rec in reader.records() {
            let rec = rec.map_err(|source| BamcoverError::BamRead {
                path: bam.to_path_buf(),
                source,
            })?;
            if !keep_all && !self.policy.passes_filter(&rec) {
                continue;
            }
            if let Some(interval) = record_to_interval(&rec) {
                intervals.push(interval);
            }
        }
        Ok(intervals)
    }
}
