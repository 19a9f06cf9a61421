//cli.rs
// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

/// Default name of the log file if none is given on the command line.
pub const DEFAULT_LOG_FILE: &str = "bamcover.log";

/// Generate coverage information for BAM files
#[derive(Parser, Debug, Clone)]
#[command(name = "bamcover", version)]
pub struct CoverCli {
    /// TSV coordinates file (1-based) for region of interest
    #[arg(long, value_name = "COORDS")]
    pub coords: PathBuf,

    /// bam files containing mapped reads (sorted and indexed)
    #[arg(required = true, value_name = "BAMS")]
    pub bams: Vec<PathBuf>,

    /// Log progress in FILE.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,

    /// Directory the png files are written to
    #[arg(short = 'o', long, default_value = ".")]
    pub outdir: PathBuf,

    /// Worker threads used for the bam files of one region
    #[arg(short = 't', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,

    /// Log and skip bam files that fail instead of stopping the run
    #[arg(long)]
    pub keep_going: bool,

    /// Minimum mapping quality to include a read
    #[arg(long, default_value_t = 0)]
    pub min_mapping_quality: u8,

    /// Exclude reads with ANY of these SAM flag bits set.
    /// Example: 2816 = secondary(256) + QC-fail(512) + supplementary(2048)
    #[arg(long, default_value_t = 0)]
    pub sam_flag_exclude: u16,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = CoverCli::try_parse_from(["bamcover", "--coords", "c.tsv", "a.bam", "b.bam"]).unwrap();
        assert_eq!(cli.coords, PathBuf::from("c.tsv"));
        assert_eq!(cli.bams, vec![PathBuf::from("a.bam"), PathBuf::from("b.bam")]);
        assert_eq!(cli.log, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(cli.outdir, PathBuf::from("."));
        assert_eq!(cli.threads, 1);
        assert!(!cli.keep_going);
        assert_eq!(cli.min_mapping_quality, 0);
        assert_eq!(cli.sam_flag_exclude, 0);
    }

    #[test]
    fn test_requires_coords_and_bams() {
        assert!(CoverCli::try_parse_from(["bamcover", "a.bam"]).is_err());
        assert!(CoverCli::try_parse_from(["bamcover", "--coords", "c.tsv"]).is_err());
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        assert!(CoverCli::try_parse_from(["bamcover", "--coords", "c.tsv", "-t", "0", "a.bam"]).is_err());
    }
}
