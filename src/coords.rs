// src/coords.rs
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{BamcoverError, Result};
use crate::region::Region;

/// Why a coordinates row was not turned into a [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// fewer than three tab separated fields
    TooFewFields,
    /// start or end is not a plain non-negative integer
    NotAnInteger,
    /// start is 0, larger than end, or a position is beyond what htslib can address
    InvalidRange,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::TooFewFields => "fewer than 3 fields",
            SkipReason::NotAnInteger => "start/end is not an integer",
            SkipReason::InvalidRange => "start must be >= 1 and <= end <= 2^63-1",
        };
        write!(f, "{text}")
    }
}

/// A row of the coordinates file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number
    pub line: usize,
    pub row: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping invalid coordinate (line {}, {}): {:?}",
            self.line, self.reason, self.row
        )
    }
}

/// The regions in file order plus everything that was left out.
#[derive(Debug, Default, Clone)]
pub struct CoordsReport {
    pub regions: Vec<Region>,
    pub skipped: Vec<SkippedRow>,
}

/// Read a tab separated `chr<TAB>start<TAB>end` file (1-based, inclusive).
///
/// Malformed rows never fail the load; they end up in [`CoordsReport::skipped`].
/// Only a file that cannot be opened or read is an error.
pub fn load(path: &Path) -> Result<CoordsReport> {
    let file = File::open(path).map_err(|source| BamcoverError::Coords {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(BufReader::new(file)).map_err(|source| BamcoverError::Coords {
        path: path.to_path_buf(),
        source,
    })
}

/// Same as [`load`] for any buffered reader.
pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<CoordsReport> {
    let mut report = CoordsReport::default();
    for (id, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line.strip_suffix('\r').unwrap_or(&line);
        match parse_row(row) {
            Ok(region) => report.regions.push(region),
            Err(reason) => report.skipped.push(SkippedRow {
                line: id + 1,
                row: row.to_string(),
                reason,
            }),
        }
    }
    Ok(report)
}

/// Parse one row; extra fields after the third are ignored.
pub fn parse_row(row: &str) -> std::result::Result<Region, SkipReason> {
    let fields: Vec<&str> = row.split('\t').collect();
    if fields.len() < 3 {
        return Err(SkipReason::TooFewFields);
    }
    let start = parse_position(fields[1]).ok_or(SkipReason::NotAnInteger)?;
    let end = parse_position(fields[2]).ok_or(SkipReason::NotAnInteger)?;
    Region::new(fields[0], start, end).ok_or(SkipReason::InvalidRange)
}

/// Digits only - no sign, no whitespace.
fn parse_position(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_valid_rows() {
        let data = "chr1\t100\t200\nchr2\tx\t50\nchr3\t10\n";
        let report = from_reader(data.as_bytes()).unwrap();
        assert_eq!(report.regions, vec![Region::new("chr1", 100, 200).unwrap()]);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(report.skipped[0].reason, SkipReason::NotAnInteger);
        assert_eq!(report.skipped[1].line, 3);
        assert_eq!(report.skipped[1].reason, SkipReason::TooFewFields);
    }

    #[test]
    fn test_extra_fields_and_crlf() {
        let data = "chr1\t5\t9\tgene_a\r\nchr2\t1\t1\r\n";
        let report = from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            report.regions,
            vec![
                Region::new("chr1", 5, 9).unwrap(),
                Region::new("chr2", 1, 1).unwrap()
            ]
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_positions_beyond_i64_are_invalid() {
        // 2^63 fits in u64 but not in htslib's signed positions
        assert_eq!(
            parse_row("chr1\t1\t9223372036854775808"),
            Err(SkipReason::InvalidRange)
        );
        assert_eq!(
            parse_row("chr1\t9223372036854775808\t9223372036854775809"),
            Err(SkipReason::InvalidRange)
        );
        let region = parse_row("chr1\t1\t9223372036854775807").unwrap();
        assert_eq!(region.to_zero_based_half_open(), (0, i64::MAX));
    }

    #[test]
    fn test_rejects_signs_and_spaces() {
        assert_eq!(parse_row("chr1\t-5\t9"), Err(SkipReason::NotAnInteger));
        assert_eq!(parse_row("chr1\t+5\t9"), Err(SkipReason::NotAnInteger));
        assert_eq!(parse_row("chr1\t 5\t9"), Err(SkipReason::NotAnInteger));
        assert_eq!(parse_row("chr1\t5\t"), Err(SkipReason::NotAnInteger));
        assert_eq!(
            parse_row("chr1\t5\t99999999999999999999999"),
            Err(SkipReason::NotAnInteger)
        );
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(parse_row("chr1\t0\t9"), Err(SkipReason::InvalidRange));
        assert_eq!(parse_row("chr1\t10\t9"), Err(SkipReason::InvalidRange));
    }

    #[test]
    fn test_header_and_blank_lines_are_skipped() {
        let data = "chrom\tstart\tend\n\nchrM\t1\t16569\n";
        let report = from_reader(data.as_bytes()).unwrap();
        assert_eq!(report.regions.len(), 1);
        assert_eq!(report.regions[0].chr, "chrM");
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[1].reason, SkipReason::TooFewFields);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load(Path::new("/this/path/does/not/exist.tsv")).unwrap_err();
        assert!(matches!(err, BamcoverError::Coords { .. }));
    }
}
