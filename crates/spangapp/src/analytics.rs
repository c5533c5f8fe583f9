//! Derived series over the iteration dataset.
//!
//! Every operation here is pure: inputs are borrowed, outputs are freshly
//! allocated, and the source rows are never reordered in place.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Iteration, Position};

/// One point of the cumulative-distance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistancePoint {
    /// Timestamp of the underlying sample.
    pub timestamp: DateTime<Utc>,
    /// Sum of `distance` up to and including this sample.
    pub cumulative_distance: f64,
}

/// One bin of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge; inclusive only for the last bin.
    pub upper: f64,
    /// Number of values falling in this bin.
    pub count: usize,
}

/// The route polyline for one travel.
///
/// Matching rows are sorted ascending by timestamp, then every point is
/// emitted in order and the last point is appended once more, so a travel
/// with N samples yields N + 1 coordinates. The repeated terminal point is
/// part of the route contract; see the tests below.
#[must_use]
pub fn route_for(iterations: &[Iteration], travel_id: i64) -> Vec<Position> {
    let mut sorted: Vec<&Iteration> = iterations
        .iter()
        .filter(|it| it.travel_id == travel_id)
        .collect();
    sorted.sort_by_key(|it| it.timestamp);

    let mut line: Vec<Position> = sorted.iter().map(|it| it.position()).collect();
    if let Some(last) = sorted.last() {
        line.push(last.position());
    }
    line
}

/// Running sum of `distance`, paired with each sample's timestamp.
///
/// Rows are consumed in their natural result order, not re-sorted by
/// timestamp. Output length equals input length.
#[must_use]
pub fn cumulative_distance(iterations: &[Iteration]) -> Vec<DistancePoint> {
    let mut total = 0.0;
    iterations
        .iter()
        .map(|it| {
            total += it.distance;
            DistancePoint {
                timestamp: it.timestamp,
                cumulative_distance: total,
            }
        })
        .collect()
}

/// Arithmetic mean of `speed` per travel identifier.
///
/// Returns one entry per distinct travel id present in the input.
#[must_use]
pub fn average_speed_by_travel(iterations: &[Iteration]) -> BTreeMap<i64, f64> {
    let mut sums: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for it in iterations {
        let entry = sums.entry(it.travel_id).or_insert((0.0, 0));
        entry.0 += it.speed;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(travel_id, (sum, count))| (travel_id, sum / count as f64))
        .collect()
}

/// The rows during which a plate was detected, unmodified.
#[must_use]
pub fn detected_plate_subset(iterations: &[Iteration]) -> Vec<&Iteration> {
    iterations
        .iter()
        .filter(|it| it.has_plate_detection())
        .collect()
}

/// Bin count for automatic binning (Sturges' rule), never less than 1.
#[must_use]
pub fn auto_bin_count(value_count: usize) -> usize {
    if value_count <= 1 {
        return 1;
    }
    let n = value_count as f64;
    n.log2().ceil() as usize + 1
}

/// Equal-width histogram of `values` over their full range.
///
/// The upper edge is exclusive for every bin except the last, so the
/// maximum value is always counted. A degenerate range (all values equal)
/// collapses to a single bin. Empty input yields no bins.
#[must_use]
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &value in values {
        let index = ((value - min) / width) as usize;
        let index = index.min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}
