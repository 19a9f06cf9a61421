//aligned_interval.rs

use rust_htslib::bam::Record;
use rust_htslib::bam::record::Cigar;

/// The reference span of one aligned read.
/// Coordinates are 1-based, inclusive: [first, last].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AlignedInterval {
    pub first: u64,
    pub last: u64,
}

impl AlignedInterval {
    /// Create a new interval, assuming first <= last.
    pub fn new(first: u64, last: u64) -> Self {
        debug_assert!(first <= last, "interval [{first}, {last}] is reversed");
        Self { first, last }
    }

    /// Does the interval cover `pos` (both ends inclusive)?
    #[inline]
    pub fn contains(&self, pos: u64) -> bool {
        self.first <= pos && pos <= self.last
    }
}

/// Convert a BAM record into the span between its first and last aligned reference base.
///
/// - Only M, = and X operations produce aligned bases.
/// - D and N advance the reference; they are bridged if aligned bases follow.
/// - I, S, H and P do not consume reference.
///
/// Returns None for unmapped records and for records without any aligned base.
/// The BAM position is 0-based; the result is shifted to 1-based.
pub fn record_to_interval(rec: &Record) -> Option<AlignedInterval> {
    if rec.is_unmapped() {
        return None;
    }
    // for unmapped reads pos is typically -1
    let pos0 = rec.pos();
    if pos0 < 0 {
        return None;
    }

    let mut ref_pos: u64 = pos0 as u64;
    // 0-based, half-open bounds of the aligned bases
    let mut first: Option<u64> = None;
    let mut end: u64 = 0;

    for op in rec.cigar().iter() {
        match *op {
            Cigar::Match(len) | Cigar::Equal(len) | Cigar::Diff(len) => {
                let len = len as u64;
                if len == 0 {
                    continue;
                }
                first.get_or_insert(ref_pos);
                ref_pos += len;
                end = ref_pos;
            }

            Cigar::Del(len) | Cigar::RefSkip(len) => {
                ref_pos += len as u64;
            }

            Cigar::Ins(_len)
            | Cigar::SoftClip(_len)
            | Cigar::HardClip(_len)
            | Cigar::Pad(_len) => {}
        }
    }

    first.map(|first| AlignedInterval::new(first + 1, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_htslib::bam::record::{Cigar, CigarString};

    fn fake_record(pos: i64, cigar: CigarString) -> Record {
        let mut rec = Record::new();
        let len: u32 = cigar
            .iter()
            .map(|op| match op {
                Cigar::Match(l) | Cigar::Ins(l) | Cigar::SoftClip(l) | Cigar::Equal(l) | Cigar::Diff(l) => *l,
                _ => 0,
            })
            .sum();
        let seq = vec![b'A'; len as usize];
        let qual = vec![30u8; len as usize];
        rec.set(b"read", Some(&cigar), &seq, &qual);
        rec.set_tid(0);
        rec.set_pos(pos);
        rec
    }

    #[test]
    fn test_simple_match() {
        let rec = fake_record(9, CigarString(vec![Cigar::Match(3)]));
        assert_eq!(record_to_interval(&rec), Some(AlignedInterval::new(10, 12)));
    }

    #[test]
    fn test_soft_clips_are_not_aligned() {
        let rec = fake_record(
            100,
            CigarString(vec![Cigar::SoftClip(5), Cigar::Match(10), Cigar::SoftClip(3)]),
        );
        assert_eq!(record_to_interval(&rec), Some(AlignedInterval::new(101, 110)));
    }

    #[test]
    fn test_splice_is_bridged() {
        let rec = fake_record(
            100,
            CigarString(vec![Cigar::Match(5), Cigar::RefSkip(10), Cigar::Equal(2), Cigar::Diff(3)]),
        );
        assert_eq!(record_to_interval(&rec), Some(AlignedInterval::new(101, 120)));
    }

    #[test]
    fn test_trailing_deletion_is_not_aligned() {
        let rec = fake_record(0, CigarString(vec![Cigar::Match(4), Cigar::Del(2)]));
        assert_eq!(record_to_interval(&rec), Some(AlignedInterval::new(1, 4)));
    }

    #[test]
    fn test_no_aligned_base() {
        let rec = fake_record(50, CigarString(vec![Cigar::SoftClip(10)]));
        assert_eq!(record_to_interval(&rec), None);
    }

    #[test]
    fn test_unmapped_record() {
        let mut rec = fake_record(50, CigarString(vec![Cigar::Match(10)]));
        rec.set_unmapped();
        assert_eq!(record_to_interval(&rec), None);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let iv = AlignedInterval::new(10, 12);
        assert!(iv.contains(10) && iv.contains(12));
        assert!(!iv.contains(9) && !iv.contains(13));
    }
}
