//! Plain-text rendering of views.
//!
//! This is the terminal backend: tables become aligned grids, the route
//! becomes a coordinate listing, the chart becomes a small ASCII plot, and
//! histograms become horizontal bars. Richer hosts can consume the same
//! views as JSON instead.

use std::fmt::Write as _;

use super::{ChartView, HistogramView, HomeView, MapView, StatisticsView, TableView, View};

/// Columns of the ASCII chart plot area.
const PLOT_WIDTH: usize = 64;

/// Rows of the ASCII chart plot area.
const PLOT_HEIGHT: usize = 16;

/// Longest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

/// Render any view as plain text.
#[must_use]
pub fn to_text(view: &View) -> String {
    match view {
        View::Home(home) => home_text(home),
        View::Table(table) => table_text(table),
        View::Map(map) => map_text(map),
        View::Chart(chart) => chart_text(chart),
        View::Statistics(stats) => statistics_text(stats),
    }
}

fn home_text(home: &HomeView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", home.title);
    let _ = writeln!(out, "{}", "=".repeat(home.title.chars().count()));
    for paragraph in &home.paragraphs {
        let _ = writeln!(out);
        let _ = writeln!(out, "{paragraph}");
    }
    out
}

fn table_text(view: &TableView) -> String {
    let table = &view.table;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} rows)", view.title, table.row_count());

    if table.columns.is_empty() {
        return out;
    }

    // Column widths from headers and stringified cells
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c:<width$}", width = widths[i]))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }

    out
}

fn map_text(map: &MapView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", map.title);

    match map.travel {
        Some(id) => {
            let travels: Vec<String> = map.available_travels.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "Travel {id} (available: {})", travels.join(", "));
            let _ = writeln!(out, "{} positions, route of {} points", map.points.len(), map.route.len());
            let _ = writeln!(out);
            for (index, pos) in map.route.iter().enumerate() {
                let _ = writeln!(out, "  {index:>4}  {:>11.6}  {:>11.6}", pos.latitude, pos.longitude);
            }
        }
        None => {
            let _ = writeln!(out, "No travels recorded; the map is empty.");
        }
    }

    out
}

fn chart_text(chart: &ChartView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}x{})", chart.title, chart.width, chart.height);

    if chart.points.is_empty() {
        let _ = writeln!(out, "(no data)");
        return out;
    }

    let t_min = chart.points.iter().map(|p| p.timestamp).min().unwrap_or_default();
    let t_max = chart.points.iter().map(|p| p.timestamp).max().unwrap_or_default();
    let y_min = chart
        .points
        .iter()
        .map(|p| p.cumulative_distance)
        .fold(f64::INFINITY, f64::min);
    let y_max = chart
        .points
        .iter()
        .map(|p| p.cumulative_distance)
        .fold(f64::NEG_INFINITY, f64::max);

    let t_span = (t_max - t_min).num_milliseconds().max(0) as f64;
    let y_span = y_max - y_min;

    let mut grid = vec![vec![' '; PLOT_WIDTH]; PLOT_HEIGHT];
    for point in &chart.points {
        let x = if t_span > 0.0 {
            let offset = (point.timestamp - t_min).num_milliseconds() as f64;
            ((offset / t_span) * (PLOT_WIDTH - 1) as f64).round() as usize
        } else {
            0
        };
        let y = if y_span > 0.0 {
            (((point.cumulative_distance - y_min) / y_span) * (PLOT_HEIGHT - 1) as f64).round()
                as usize
        } else {
            0
        };
        let row = PLOT_HEIGHT - 1 - y.min(PLOT_HEIGHT - 1);
        grid[row][x.min(PLOT_WIDTH - 1)] = '*';
    }

    for (index, row) in grid.iter().enumerate() {
        let label = if index == 0 {
            format!("{y_max:>10.1}")
        } else if index == PLOT_HEIGHT - 1 {
            format!("{y_min:>10.1}")
        } else {
            " ".repeat(10)
        };
        let line: String = row.iter().collect();
        let _ = writeln!(out, "{label} |{line}");
    }

    let _ = writeln!(out, "{} +{}", " ".repeat(10), "-".repeat(PLOT_WIDTH));
    let _ = writeln!(
        out,
        "{} {}  ..  {}",
        " ".repeat(10),
        t_min.to_rfc3339(),
        t_max.to_rfc3339()
    );

    out
}

fn histogram_text(histogram: &HistogramView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", histogram.title);

    if histogram.bins.is_empty() {
        let _ = writeln!(out, "(no data)");
        return out;
    }

    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &histogram.bins {
        let bar_len = if max_count > 0 {
            bin.count * BAR_WIDTH / max_count
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:>9.1} - {:>9.1}  {:<width$}  {}",
            bin.lower,
            bin.upper,
            "#".repeat(bar_len),
            bin.count,
            width = BAR_WIDTH
        );
    }

    out
}

fn statistics_text(stats: &StatisticsView) -> String {
    let mut out = histogram_text(&stats.mean_speed);
    out.push('\n');
    out.push_str(&histogram_text(&stats.detected_plates));
    out
}
