//! Presentation layer for spangapp.
//!
//! Rendering is a pure function from a selection plus the loaded datasets
//! to a typed [`View`] value. Views carry everything a host surface needs
//! to draw a section; the plain-text backend in [`text`] is one such
//! surface, and every view also serializes to JSON.

pub mod text;

use serde::{Deserialize, Serialize};

use crate::analytics::{
    self, auto_bin_count, average_speed_by_travel, cumulative_distance, detected_plate_subset,
    route_for, DistancePoint, HistogramBin,
};
use crate::config::Config;
use crate::dataset::{Datasets, Table};
use crate::error::Result;
use crate::record::Position;
use crate::state::{Section, Selection};

/// Sizing and binning options carried into a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Width of the cumulative-distance chart, in pixels.
    pub chart_width: u32,
    /// Height of the cumulative-distance chart, in pixels.
    pub chart_height: u32,
    /// Number of bins in the mean-speed histogram.
    pub speed_bins: usize,
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            chart_width: config.chart.width,
            chart_height: config.chart.height,
            speed_bins: config.statistics.speed_bins,
        }
    }
}

/// A fully rendered section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Static landing content.
    Home(HomeView),
    /// One raw table, verbatim.
    Table(TableView),
    /// Positions and route polyline of one travel.
    Map(MapView),
    /// Cumulative distance over time.
    Chart(ChartView),
    /// Paired speed histograms.
    Statistics(StatisticsView),
}

/// Static descriptive content; no data dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeView {
    /// Page title.
    pub title: String,
    /// Body paragraphs.
    pub paragraphs: Vec<String>,
}

/// A raw table shown as a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    /// Dataset label.
    pub title: String,
    /// The table, unmodified.
    pub table: Table,
}

/// The map of one travel: a scatter of sample positions with the route
/// polyline overlaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Section title.
    pub title: String,
    /// The travel being shown; `None` when no travels exist.
    pub travel: Option<i64>,
    /// All travels available for selection, first-seen order.
    pub available_travels: Vec<i64>,
    /// Sample positions of the selected travel, in timestamp order.
    pub points: Vec<Position>,
    /// Route polyline over the same positions.
    pub route: Vec<Position>,
}

/// The cumulative-distance line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    /// Chart title.
    pub title: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Time-ordered series, x = timestamp, y = cumulative distance.
    pub points: Vec<DistancePoint>,
}

/// One titled histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramView {
    /// Histogram title.
    pub title: String,
    /// Binned distribution.
    pub bins: Vec<HistogramBin>,
}

/// The two side-by-side histograms of the Statistics section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsView {
    /// Distribution of per-travel mean speeds.
    pub mean_speed: HistogramView,
    /// Distribution of speeds where a plate was detected.
    pub detected_plates: HistogramView,
}

/// Render the selected section.
///
/// Pure: the datasets are only read, and each call builds its view from
/// scratch. Errors abort only the section being rendered.
///
/// # Errors
///
/// Returns [`crate::Error::EmptySelection`] if the selection names a
/// travel that does not exist.
pub fn render(selection: &Selection, data: &Datasets, options: &RenderOptions) -> Result<View> {
    match selection.section {
        Section::Home => Ok(View::Home(home_view())),
        Section::Dashboard => Ok(View::Table(TableView {
            title: selection.dataset.to_string(),
            table: data.table(selection.dataset).clone(),
        })),
        Section::Map => map_view(selection, data).map(View::Map),
        Section::Chart => Ok(View::Chart(ChartView {
            title: "Distance travelled over time".to_string(),
            width: options.chart_width,
            height: options.chart_height,
            points: cumulative_distance(&data.iteration),
        })),
        Section::Statistics => Ok(View::Statistics(statistics_view(data, options))),
    }
}

fn home_view() -> HomeView {
    HomeView {
        title: "SpangApp: vehicle proximity tracking".to_string(),
        paragraphs: vec![
            "Road safety is a major concern for governments and companies \
             worldwide. Rear-end collisions are among the most frequent \
             accidents, and warning drivers about the proximity of the \
             vehicles around them measurably reduces them."
                .to_string(),
            "The Spacing Angels autonomous educational radar records vehicle \
             positions, speeds and plate detections at the roadside. This \
             dashboard reads the radar's database and lets you browse the \
             raw datasets, follow each travel on a map, and study distance \
             and speed distributions."
                .to_string(),
        ],
    }
}

fn map_view(selection: &Selection, data: &Datasets) -> Result<MapView> {
    let available_travels = data.travel_ids();
    let travel = selection.resolve_travel(data)?;

    let (points, route) = match travel {
        Some(id) => {
            let mut samples: Vec<&crate::record::Iteration> = data
                .iteration
                .iter()
                .filter(|it| it.travel_id == id)
                .collect();
            samples.sort_by_key(|it| it.timestamp);
            let points = samples.iter().map(|it| it.position()).collect();
            (points, route_for(&data.iteration, id))
        }
        None => (Vec::new(), Vec::new()),
    };

    Ok(MapView {
        title: "Vehicle positions and route".to_string(),
        travel,
        available_travels,
        points,
        route,
    })
}

fn statistics_view(data: &Datasets, options: &RenderOptions) -> StatisticsView {
    let means = average_speed_by_travel(&data.iteration);
    let mean_values: Vec<f64> = means.values().copied().collect();

    let detected: Vec<f64> = detected_plate_subset(&data.iteration)
        .iter()
        .map(|it| it.speed)
        .collect();

    StatisticsView {
        mean_speed: HistogramView {
            title: "Mean speed per travel".to_string(),
            bins: analytics::histogram(&mean_values, options.speed_bins),
        },
        detected_plates: HistogramView {
            title: "Detected plates by vehicle speed".to_string(),
            bins: analytics::histogram(&detected, auto_bin_count(detected.len())),
        },
    }
}
