//alignment_policy.rs
use rust_htslib::bam::Record;
use crate::cli::CoverCli;


/// Which records count towards the coverage.
///
/// The default keeps every record; records without aligned bases drop out later
/// in [`crate::core::aligned_interval::record_to_interval`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentPolicy {
    pub min_mapq: u8,
    /// Records with ANY of these SAM flag bits set are dropped.
    pub sam_flag_exclude: u16,
}

impl AlignmentPolicy {

    pub fn new(min_mapq: u8, sam_flag_exclude: u16) -> Self {
        Self { min_mapq, sam_flag_exclude }
    }

    pub fn from_cli(cli: &CoverCli) -> Self {
        Self::new(cli.min_mapping_quality, cli.sam_flag_exclude)
    }

    /// True when no record can be dropped, so the caller may skip the check.
    pub fn keeps_everything(&self) -> bool {
        self.min_mapq == 0 && self.sam_flag_exclude == 0
    }

    /// Does `flags` hit the exclude mask?
    #[inline]
    pub fn excludes_flags(&self, flags: u16) -> bool {
        flags & self.sam_flag_exclude != 0
    }

    #[inline]
    pub fn passes_filter(&self, rec: &Record) -> bool {
        rec.mapq() >= self.min_mapq && !self.excludes_flags(rec.flags())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rust_htslib::bam::Record;

    /// Minimal record with configurable flags and MAPQ.
    fn fake_record(flags: u16, mapq: u8) -> Record {
        let mut rec = Record::new();
        rec.set_flags(flags);
        rec.set_mapq(mapq);
        rec
    }

    #[test]
    fn test_default_keeps_everything() {
        let policy = AlignmentPolicy::default();

        assert!(policy.passes_filter(&fake_record(0, 0)));
        assert!(policy.passes_filter(&fake_record(0x100, 0)));
        assert!(policy.passes_filter(&fake_record(0x400 | 0x800, 60)));
    }

    #[test]
    fn test_keeps_everything_only_without_thresholds() {
        assert!(AlignmentPolicy::default().keeps_everything());
        assert!(!AlignmentPolicy::new(1, 0).keeps_everything());
        assert!(!AlignmentPolicy::new(0, 0x4).keeps_everything());
    }

    #[test]
    fn test_excludes_flags_is_any_bit() {
        let policy = AlignmentPolicy::new(0, 0x100 | 0x800);
        assert!(policy.excludes_flags(0x800 | 0x1));
        assert!(!policy.excludes_flags(0x400 | 0x1));
    }

    #[test]
    fn test_filters_secondary() {
        // 0x100 = secondary
        let policy = AlignmentPolicy::new(0, 0x100);
        assert!(!policy.passes_filter(&fake_record(0x100, 30)));
        assert!(policy.passes_filter(&fake_record(0x400, 30)));
    }

    #[test]
    fn test_combined_mask() {
        // 2816 = secondary(256) + QC-fail(512) + supplementary(2048)
        let policy = AlignmentPolicy::new(0, 2816);
        assert!(!policy.passes_filter(&fake_record(0x200, 30)));
        assert!(!policy.passes_filter(&fake_record(0x800, 30)));
        assert!(policy.passes_filter(&fake_record(0x400, 30)));
    }

    #[test]
    fn test_min_mapq() {
        let policy = AlignmentPolicy::new(20, 0);

        let good = fake_record(0, 30);
        let edge = fake_record(0, 20);
        let bad = fake_record(0, 10);

        assert!(policy.passes_filter(&good));
        assert!(policy.passes_filter(&edge));
        assert!(!policy.passes_filter(&bad));
    }
}
