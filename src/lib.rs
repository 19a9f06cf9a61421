//! Per-base read coverage of BAM files over regions of interest, one PNG chart per region.
//!
//! The pieces, leaf first:
//! [`coords`] reads the regions, [`bam_source`] turns the reads of a region into
//! [`core::aligned_interval::AlignedInterval`]s, [`core::depth_index`] counts how
//! many of them cover each position, [`core::sampler`] walks the region, and
//! [`chart`] draws the curves. [`processor`] ties it together.

pub mod bam_source;
pub mod chart;
pub mod cli;
pub mod coords;
pub mod core;
pub mod error;
pub mod logging;
pub mod processor;
pub mod region;
