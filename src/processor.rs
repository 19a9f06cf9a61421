// src/processor.rs
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::bam_source::{AlignmentSource, HtsAlignmentSource};
use crate::chart::{legend_label, Chart, ChartRenderer, CoverageSeries, PngRenderer};
use crate::cli::CoverCli;
use crate::coords;
use crate::core::alignment_policy::AlignmentPolicy;
use crate::core::depth_index::DepthIndex;
use crate::core::sampler::sample;
use crate::error::{BamcoverError, Result};
use crate::region::Region;

/// What happened to one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOutcome {
    pub region: Region,
    /// the written chart
    pub path: PathBuf,
    /// bam files that were skipped with `keep_going`
    pub failed: Vec<PathBuf>,
}

/// The coverage of one bam file over one region.
pub fn coverage_series<S: AlignmentSource + ?Sized>(
    source: &S,
    bam: &Path,
    region: &Region,
) -> Result<CoverageSeries> {
    info!("processing bam file {}", bam.display());
    let intervals = source.intervals(bam, region)?;
    debug!("{} aligned reads overlap {region} in {}", intervals.len(), bam.display());
    let index = DepthIndex::build(intervals);
    let depths = sample(&index, region);
    Ok(CoverageSeries::new(legend_label(bam), region, depths))
}

/// Draws one chart per region with one curve per bam file.
///
/// The bam files of a region are processed on a private rayon pool; the
/// series always end up in the order the bam files were given.
pub struct RegionProcessor<S: AlignmentSource, R: ChartRenderer> {
    source: S,
    renderer: R,
    bams: Vec<PathBuf>,
    outdir: PathBuf,
    keep_going: bool,
    pool: rayon::ThreadPool,
}

impl<S: AlignmentSource, R: ChartRenderer> RegionProcessor<S, R> {

    /// A sequential processor; see [`RegionProcessor::with_threads`].
    /// `outdir` is created if it does not exist.
    pub fn new(source: S, renderer: R, bams: Vec<PathBuf>, outdir: &Path) -> Result<Self> {
        std::fs::create_dir_all(outdir).map_err(|source| BamcoverError::OutDir {
            path: outdir.to_path_buf(),
            source,
        })?;
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build()?;
        Ok(Self {
            source,
            renderer,
            bams,
            outdir: outdir.to_path_buf(),
            keep_going: false,
            pool,
        })
    }

    /// Use up to `threads` workers (never more than cpus or bam files).
    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        let threads = threads.min(num_cpus::get()).min(self.bams.len()).max(1);
        self.pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(self)
    }

    /// Skip failing bam files instead of aborting.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Collect the series of all bam files for `region`, in input order.
    pub fn collect_chart(&self, region: &Region) -> Result<(Chart, Vec<PathBuf>)> {
        let source = &self.source;
        let bams = &self.bams;
        let mut chart = Chart::new(region);
        let mut failed = Vec::new();

        if self.keep_going {
            let results: Vec<Result<CoverageSeries>> = self.pool.install(|| {
                bams.par_iter()
                    .map(|bam| coverage_series(source, bam, region))
                    .collect()
            });
            for (bam, result) in bams.iter().zip(results) {
                match result {
                    Ok(series) => chart.add_series(series),
                    Err(e) => {
                        error!("skipping {} for {region}: {e}", bam.display());
                        failed.push(bam.clone());
                    }
                }
            }
        } else {
            let all: Vec<CoverageSeries> = self.pool.install(|| {
                bams.par_iter()
                    .map(|bam| coverage_series(source, bam, region))
                    .collect::<Result<Vec<_>>>()
            })?;
            for series in all {
                chart.add_series(series);
            }
        }
        Ok((chart, failed))
    }

    /// Compute and write the chart of one region.
    pub fn process(&self, region: &Region) -> Result<RegionOutcome> {
        info!("processing coord {} {} {}", region.chr, region.start, region.end);
        let (chart, failed) = self.collect_chart(region)?;
        let path = self.outdir.join(chart.file_name());
        self.renderer.render(&chart, &path)?;
        info!("wrote {}", path.display());
        Ok(RegionOutcome {
            region: region.clone(),
            path,
            failed,
        })
    }

    /// Process all regions in order; the first error stops the run.
    pub fn run(&self, regions: &[Region]) -> Result<Vec<RegionOutcome>> {
        let pb = ProgressBar::new(regions.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}") {
            pb.set_style(style);
        }

        let mut outcomes = Vec::with_capacity(regions.len());
        for region in regions {
            pb.set_message(region.to_string());
            outcomes.push(self.process(region)?);
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(outcomes)
    }
}

/// Everything the binary does after logging is set up.
pub fn plot_coverage(cli: &CoverCli) -> Result<Vec<RegionOutcome>> {
    let report = coords::load(&cli.coords)?;
    for skipped in &report.skipped {
        warn!("{skipped}");
    }
    info!(
        "{} regions to plot for {} bam files",
        report.regions.len(),
        cli.bams.len()
    );

    let source = HtsAlignmentSource::new(AlignmentPolicy::from_cli(cli));
    let renderer = PngRenderer::new(cli.width, cli.height);
    let processor = RegionProcessor::new(source, renderer, cli.bams.clone(), &cli.outdir)?
        .with_threads(cli.threads as usize)?
        .keep_going(cli.keep_going);

    processor.run(&report.regions)
}
