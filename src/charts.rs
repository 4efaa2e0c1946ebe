// 📊 Figures - descriptive charts over the cleaned table
//
// Every figure is plain data plus labels, serialized as one JSON document
// per chart. Building is pure and deterministic; rendering pixels is left
// to whatever consumes the documents (or the terminal viewer).

use crate::cleaning::{format_number, CleanedTable};
use crate::error::{PipelineError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Histogram bin edges for ratings: [1,2) [2,3) [3,4) [4,5) [5,6]
pub const RATING_BIN_EDGES: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

/// Jitter amplitudes for the scatter plot (price, revenue)
pub const SCATTER_JITTER: Jitter = Jitter { x: 0.5, y: 500.0 };

// ============================================================================
// FIGURE MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// File stem, e.g. "BarChart"
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: FigureData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FigureData {
    Bar { bars: Vec<LabeledValue> },
    Box { groups: Vec<BoxSummary> },
    Line { points: Vec<LinePoint>, highlight: Option<DateSpan> },
    Scatter { series: Vec<ScatterSeries>, jitter: Jitter },
    Histogram { bins: Vec<HistogramBin> },
    Pie { slices: Vec<PieSlice> },
    Heatmap { rows: Vec<String>, columns: Vec<String>, counts: Vec<Vec<u64>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub label: String,
    pub count: usize,
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: u64,
    pub percent: f64,
    pub percent_label: String,
}

/// Knobs the figures take from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureOptions {
    pub holiday: Option<(NaiveDate, NaiveDate)>,
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Quantile of sorted values with linear interpolation between ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Five-number summary with 1.5 IQR whiskers
pub fn box_summary(label: &str, values: &[f64]) -> Option<BoxSummary> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v >= low_fence && *v <= high_fence)
        .collect();
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxSummary {
        label: label.to_string(),
        count: sorted.len(),
        whisker_low: inside.first().copied().unwrap_or(q1),
        q1,
        median,
        q3,
        whisker_high: inside.last().copied().unwrap_or(q3),
        outliers,
    })
}

// ============================================================================
// FIGURE BUILDERS
// ============================================================================

/// Figure 1: total average revenue per category, largest first
pub fn revenue_by_category(table: &CleanedTable) -> Figure {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in &table.rows {
        *totals.entry(row.category.as_str()).or_insert(0.0) += row.average_revenue;
    }

    let mut bars: Vec<LabeledValue> = totals
        .into_iter()
        .map(|(label, value)| LabeledValue {
            label: label.to_string(),
            value,
        })
        .collect();
    // stable sort: equal totals stay in name order
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));

    Figure {
        name: "BarChart".to_string(),
        title: "Figure 1: Total Average Revenue by Lodging Category".to_string(),
        x_label: "Lodging Category".to_string(),
        y_label: "Total Average Revenue (USD)".to_string(),
        data: FigureData::Bar { bars },
    }
}

/// Figure 2: price distribution per lodging type
pub fn price_boxplot(table: &CleanedTable) -> Figure {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        groups.entry(row.subtype.as_str()).or_default().push(row.price);
    }

    let groups = groups
        .into_iter()
        .filter_map(|(label, prices)| box_summary(label, &prices))
        .collect();

    Figure {
        name: "Boxplot".to_string(),
        title: "Figure 2: Boxplot - Price Distribution by Lodging Type".to_string(),
        x_label: "Lodging Type".to_string(),
        y_label: "Price (USD)".to_string(),
        data: FigureData::Box { groups },
    }
}

/// Figure 3: mean average revenue per date, oldest first
pub fn revenue_over_time(table: &CleanedTable, options: &FigureOptions) -> Figure {
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        let entry = by_date.entry(row.date).or_insert((0.0, 0));
        entry.0 += row.average_revenue;
        entry.1 += 1;
    }

    let points = by_date
        .into_iter()
        .map(|(date, (sum, count))| LinePoint {
            date,
            value: sum / count as f64,
        })
        .collect();

    let highlight = options.holiday.map(|(start, end)| DateSpan {
        start,
        end,
        label: "Holiday Season".to_string(),
    });

    Figure {
        name: "LinePlot".to_string(),
        title: "Figure 3: Line Plot - Average Revenue Over Time".to_string(),
        x_label: "Date".to_string(),
        y_label: "Average Revenue (USD)".to_string(),
        data: FigureData::Line { points, highlight },
    }
}

/// Figure 4: average revenue against price, one series per lodging type
pub fn revenue_vs_price(table: &CleanedTable) -> Figure {
    let mut series: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for row in &table.rows {
        series
            .entry(row.subtype.as_str())
            .or_default()
            .push((row.price, row.average_revenue));
    }

    let series = series
        .into_iter()
        .map(|(label, points)| ScatterSeries {
            label: label.to_string(),
            points,
        })
        .collect();

    Figure {
        name: "Scatter_AverageRevenue_vs_Price".to_string(),
        title: "Average Revenue vs. Price by Lodging Type".to_string(),
        x_label: "Price (USD)".to_string(),
        y_label: "Average Revenue (USD)".to_string(),
        data: FigureData::Scatter {
            series,
            jitter: SCATTER_JITTER,
        },
    }
}

/// Index of the rating bin a value falls in. The last bin is closed.
fn rating_bin(value: f64) -> Option<usize> {
    let first = RATING_BIN_EDGES[0];
    let last = RATING_BIN_EDGES[RATING_BIN_EDGES.len() - 1];
    if value < first || value > last {
        return None;
    }
    let bins = RATING_BIN_EDGES.len() - 1;
    RATING_BIN_EDGES
        .windows(2)
        .position(|edge| value >= edge[0] && value < edge[1])
        .or(Some(bins - 1))
}

/// Figure 5: rating frequencies
pub fn rating_histogram(table: &CleanedTable) -> Figure {
    let mut bins: Vec<HistogramBin> = RATING_BIN_EDGES
        .windows(2)
        .map(|edge| HistogramBin {
            start: edge[0],
            end: edge[1],
            count: 0,
        })
        .collect();

    for rating in table.ratings() {
        if let Some(index) = rating_bin(rating) {
            bins[index].count += 1;
        }
    }

    Figure {
        name: "Histogram".to_string(),
        title: "Figure 5: Histogram - Distribution of Ratings".to_string(),
        x_label: "Rating".to_string(),
        y_label: "Frequency".to_string(),
        data: FigureData::Histogram { bins },
    }
}

/// Figure 6: share of each lodging type, most common first
pub fn type_proportions(table: &CleanedTable) -> Figure {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for row in &table.rows {
        *counts.entry(row.subtype.as_str()).or_insert(0) += 1;
    }
    let total = table.len() as f64;

    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(label, count)| {
            let percent = count as f64 / total * 100.0;
            PieSlice {
                label: label.to_string(),
                count,
                percent,
                percent_label: format!("{:.1}%", percent),
            }
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count));

    Figure {
        name: "PieChart".to_string(),
        title: "Figure 6: Pie Chart - Proportion of Lodging Types".to_string(),
        x_label: String::new(),
        y_label: String::new(),
        data: FigureData::Pie { slices },
    }
}

/// Figure 7: record counts per (lodging type, rating)
pub fn type_rating_heatmap(table: &CleanedTable) -> Figure {
    let mut ratings: Vec<f64> = table.ratings();
    ratings.sort_by(|a, b| a.total_cmp(b));
    ratings.dedup();
    // + 0.0 folds -0 into 0 for the label
    let columns: Vec<String> = ratings.iter().map(|r| format_number(*r + 0.0)).collect();

    let mut cells: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for row in &table.rows {
        let Some(column) = ratings.iter().position(|r| *r == row.rating) else {
            continue;
        };
        let counts = cells
            .entry(row.subtype.as_str())
            .or_insert_with(|| vec![0; columns.len()]);
        counts[column] += 1;
    }

    let rows = cells.keys().map(|k| k.to_string()).collect();
    let counts = cells.into_values().collect();

    Figure {
        name: "Heatmap".to_string(),
        title: "Figure 7: Heat Map - Lodging Type vs. Rating".to_string(),
        x_label: "Rating".to_string(),
        y_label: "Lodging Type".to_string(),
        data: FigureData::Heatmap { rows, columns, counts },
    }
}

/// All seven figures, in presentation order
pub fn build_figures(table: &CleanedTable, options: &FigureOptions) -> Vec<Figure> {
    vec![
        revenue_by_category(table),
        price_boxplot(table),
        revenue_over_time(table, options),
        revenue_vs_price(table),
        rating_histogram(table),
        type_proportions(table),
        type_rating_heatmap(table),
    ]
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Write each figure to `<dir>/<name>.json`, replacing existing files
pub fn write_figures(figures: &[Figure], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::persistence(dir, e))?;

    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        let path = dir.join(format!("{}.json", figure.name));
        let json = serde_json::to_string_pretty(figure)
            .map_err(|e| PipelineError::persistence(&path, e.into()))?;
        fs::write(&path, json).map_err(|e| PipelineError::persistence(&path, e))?;
        written.push(path);
    }

    info!(dir = %dir.display(), count = written.len(), "figures written");
    Ok(written)
}
