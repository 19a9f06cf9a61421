use std::fmt;
use std::fmt::Display;

/// A region of interest on one chromosome.
/// Coordinates are 1-based and inclusive on both ends: [start, end].
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Region {
    pub chr: String,
    pub start: u64,
    pub end: u64,
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)?;
        Ok(())
    }
}

/// Largest coordinate htslib can address (`hts_pos_t` is an i64).
pub const MAX_POSITION: u64 = i64::MAX as u64;

impl Region {
    /// Returns None unless 1 <= start <= end <= [`MAX_POSITION`].
    pub fn new(chr: &str, start: u64, end: u64) -> Option<Self> {
        if start == 0 || start > end || end > MAX_POSITION {
            return None;
        }
        Some(Self {
            chr: chr.to_string(),
            start,
            end,
        })
    }

    /// Number of bases in the region.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// The positions of the region in increasing order.
    pub fn positions(&self) -> impl Iterator<Item = u64> {
        self.start..=self.end
    }

    /// `chr.start.end` - the key used for the chart and its file name.
    pub fn stem(&self) -> String {
        format!("{}.{}.{}", self.chr, self.start, self.end)
    }

    /// 0-based half-open (start, end) as used by htslib fetch.
    /// Positions beyond [`MAX_POSITION`] saturate; [`Region::new`] never builds those.
    pub fn to_zero_based_half_open(&self) -> (i64, i64) {
        let start = i64::try_from(self.start.saturating_sub(1)).unwrap_or(i64::MAX);
        let end = i64::try_from(self.end).unwrap_or(i64::MAX);
        (start, end)
    }
}
