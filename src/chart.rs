// src/chart.rs
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{BamcoverError, Result};
use crate::region::Region;

/// Maximum number of characters of a BAM file name used in the legend.
pub const MAX_LABEL_LEN: usize = 10;

/// The first [`MAX_LABEL_LEN`] characters of the file name, directories stripped.
pub fn legend_label(bam: &Path) -> String {
    bam.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .take(MAX_LABEL_LEN)
        .collect()
}

/// One coverage curve: the depth of one BAM file over one region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageSeries {
    pub label: String,
    pub positions: Vec<u64>,
    pub depths: Vec<u32>,
}

impl CoverageSeries {
    /// `depths[i]` belongs to `region.start + i`.
    pub fn new(label: String, region: &Region, depths: Vec<u32>) -> Self {
        debug_assert_eq!(depths.len(), region.len());
        Self {
            label,
            positions: region.positions().collect(),
            depths,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.positions.iter().copied().zip(self.depths.iter().copied())
    }

    pub fn max_depth(&self) -> u32 {
        self.depths.iter().copied().max().unwrap_or(0)
    }
}

/// All series of one region, in the order they were added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chart {
    pub region: Region,
    pub series: Vec<CoverageSeries>,
}

impl Chart {
    pub fn new(region: &Region) -> Self {
        Self {
            region: region.clone(),
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: CoverageSeries) {
        self.series.push(series);
    }

    pub fn title(&self) -> String {
        self.region.to_string()
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.region.stem())
    }

    pub fn max_depth(&self) -> u32 {
        self.series.iter().map(|s| s.max_depth()).max().unwrap_or(0)
    }
}

/// Turns a finished chart into a file.
pub trait ChartRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()>;
}

/// Line plot written as PNG through the plotters bitmap backend.
#[derive(Clone, Copy, Debug)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn draw(&self, chart: &Chart, path: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
        // the drawing area lives only for this call
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let region = &chart.region;
        // plotters needs a non-empty axis range
        let x_range = region.start..region.end + 1;
        let y_range = 0u32..chart.max_depth() + 1;

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title(), ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_range, y_range)?;

        ctx.configure_mesh()
            .x_desc("Position")
            .y_desc("Coverage")
            .draw()?;

        // a label without a marker works as the legend title
        ctx.draw_series(std::iter::empty::<PathElement<(u64, u32)>>())?
            .label("Sample");

        for (id, series) in chart.series.iter().enumerate() {
            let color = Palette99::pick(id).to_rgba();
            ctx.draw_series(LineSeries::new(series.points(), color.stroke_width(2)))?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()> {
        self.draw(chart, path).map_err(|e| BamcoverError::Render {
            path: PathBuf::from(path),
            message: e.to_string(),
        })
    }
}
