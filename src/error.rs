// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a bamcover run.
///
/// Malformed coordinate rows are not in here: they are skipped and reported
/// through [`crate::coords::SkippedRow`].
#[derive(Debug, Error)]
pub enum BamcoverError {
    #[error("coordinates file {path:?} could not be read: {source}")]
    Coords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bam file {path:?} could not be opened: {source}")]
    BamOpen {
        path: PathBuf,
        #[source]
        source: rust_htslib::errors::Error,
    },

    #[error("bam file {path:?}: could not fetch {region}: {source}")]
    BamFetch {
        path: PathBuf,
        region: String,
        #[source]
        source: rust_htslib::errors::Error,
    },

    #[error("bam file {path:?}: read error: {source}")]
    BamRead {
        path: PathBuf,
        #[source]
        source: rust_htslib::errors::Error,
    },

    #[error("chart {path:?} could not be written: {message}")]
    Render { path: PathBuf, message: String },

    #[error("output directory {path:?} is not usable: {source}")]
    OutDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker pool could not be started: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("logging to {path:?} could not be set up: {message}")]
    LoggerInstalled { path: PathBuf, message: String },

    #[error("log file {path:?} could not be created: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BamcoverError>;
