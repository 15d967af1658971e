//! Plotting infrastructure for per-word bar charts
//!
//! This module draws the usage of a single word across the three rating buckets
//! using the [`plotters`] crate. Charts are saved as PNG files with fixed 1200x800 resolution.
//!
//! Every category gets the same chart; only the bar colour, the title and the
//! category key differ, all of which live in a [`CategoryPlotter`].

use crate::common::constants::{BUCKET_COUNT, BUCKET_LABELS};
use crate::common::data_structures::AggregateStructure;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Chart resolution in pixels.
const PLOT_SIZE: (u32, u32) = (1200, 800);

/// Matplotlib's `tab:pink`.
pub const WOMEN_COLOR: RGBColor = RGBColor(0xe3, 0x77, 0xc2);

/// Matplotlib's `tab:blue`.
pub const MEN_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Colours handed out to category labels without a dedicated style.
const FALLBACK_PALETTE: [RGBColor; 6] = [
    RGBColor(0xff, 0x7f, 0x0e), // tab:orange
    RGBColor(0x2c, 0xa0, 0x2c), // tab:green
    RGBColor(0xd6, 0x27, 0x28), // tab:red
    RGBColor(0x94, 0x67, 0xbd), // tab:purple
    RGBColor(0x8c, 0x56, 0x4b), // tab:brown
    RGBColor(0x7f, 0x7f, 0x7f), // tab:gray
];

/// How to draw the counts of one category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPlotter {
    /// Key looked up in each [`WordEntry`](crate::common::data_structures::WordEntry).
    pub category: String,
    /// Bar colour.
    pub color: RGBColor,
    /// Who the reviews are about, as used in the title (e.g. "women").
    pub audience: String,
}

impl CategoryPlotter {
    pub fn new(category: impl Into<String>, color: RGBColor, audience: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            color,
            audience: audience.into(),
        }
    }

    /// Pink bars for reviews of women professors (`W`).
    pub fn women() -> Self {
        Self::new("W", WOMEN_COLOR, "women")
    }

    /// Blue bars for reviews of men professors (`M`).
    pub fn men() -> Self {
        Self::new("M", MEN_COLOR, "men")
    }

    /// Style for an arbitrary category label.
    ///
    /// `W` and `M` get their dedicated styles; anything else uses the label itself as
    /// the audience and a palette colour picked by `position`.
    pub fn for_category(category: &str, position: usize) -> Self {
        match category {
            "W" => Self::women(),
            "M" => Self::men(),
            other => Self::new(
                other,
                FALLBACK_PALETTE[position % FALLBACK_PALETTE.len()],
                other,
            ),
        }
    }

    /// One plotter for every category in `structure`, in sorted category order.
    pub fn for_structure(structure: &AggregateStructure) -> Vec<Self> {
        structure
            .categories()
            .into_iter()
            .enumerate()
            .map(|(position, category)| Self::for_category(category, position))
            .collect()
    }

    /// Chart title for `word`.
    pub fn title(&self, word: &str) -> String {
        format!("\"{}\" used in reviews of {} professors", word, self.audience)
    }
}

/// Draws the low/medium/high counts of `word` for one category and saves it as a PNG.
///
/// # Arguments
/// * `structure` - Aggregated word counts
/// * `word` - The word to plot
/// * `plotter` - Category, colour and title to use
/// * `max_frequency` - Top of the y axis, usually shared between charts that are compared
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If the word is unknown or drawing failed
pub fn create_word_plot(
    structure: &AggregateStructure,
    word: &str,
    plotter: &CategoryPlotter,
    max_frequency: u64,
    output_path: &Path,
) -> Result<()> {
    let counts = word_counts(structure, word, plotter)?;

    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    draw_word_chart(&root, word, plotter, counts, max_frequency)?;

    // Ensure everything is properly rendered and saved
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Draws one panel per plotter side by side, all sharing the y axis.
///
/// The y axis is scaled to the largest count of `word` among the plotted categories.
pub fn create_word_comparison_plot(
    structure: &AggregateStructure,
    word: &str,
    plotters: &[CategoryPlotter],
    output_path: &Path,
) -> Result<()> {
    if plotters.is_empty() {
        return Err(PlotError::InvalidData(
            "At least one category is required".to_string(),
        ));
    }

    let counts = plotters
        .iter()
        .map(|plotter| word_counts(structure, word, plotter))
        .collect::<Result<Vec<_>>>()?;

    let categories: Vec<&str> = plotters.iter().map(|p| p.category.as_str()).collect();
    let max_frequency = structure.max_frequency(&[word], categories.as_slice());

    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((1, plotters.len()));
    for ((panel, plotter), counts) in panels.iter().zip(plotters).zip(counts) {
        draw_word_chart(panel, word, plotter, counts, max_frequency)?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn word_counts(
    structure: &AggregateStructure,
    word: &str,
    plotter: &CategoryPlotter,
) -> Result<[u64; BUCKET_COUNT]> {
    if !structure.contains_word(word) {
        return Err(PlotError::InvalidData(format!(
            "Word '{}' does not occur in the data",
            word
        )));
    }

    Ok(structure.counts(word, &plotter.category).counts())
}

/// Draws the bar chart itself onto an already prepared area.
fn draw_word_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    word: &str,
    plotter: &CategoryPlotter,
    counts: [u64; BUCKET_COUNT],
    max_frequency: u64,
) -> Result<()> {
    // A zero height axis can't be drawn.
    let y_max = max_frequency.max(1);
    let last_bucket = (BUCKET_COUNT - 1) as u32;

    let mut chart = ChartBuilder::on(area)
        .caption(plotter.title(word), ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((0u32..last_bucket).into_segmented(), 0u64..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Review Rating")
        .y_desc("Frequency")
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(index) => BUCKET_LABELS
                .get(*index as usize)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(index, &count)| {
            let index = index as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0),
                    (SegmentValue::Exact(index + 1), count),
                ],
                plotter.color.filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
