//! Chart series shaping.
//!
//! [`SeriesShaper`] turns the points a data kind extracted from a chart
//! response into a [`Chart`]: a time-sorted [`ChartSeries`] plus the
//! [`ChartOptions`] a time-series renderer needs.

use crate::error::FetchError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Message used when a chart has nothing to plot.
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Label of the time axis column.
pub const TIME_LABEL: &str = "Date";

const LEGEND: &str = "always";
const MAX_NUMBER_WIDTH: u32 = 10;
const Y_AXIS_LABEL_WIDTH: u32 = 90;

/// One (time, value) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }
}

// ─── Meta / options ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plotter {
    #[default]
    Line,
    Bar,
}

/// Per-chart presentation chosen by the data kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMeta {
    /// Legend label of the value column.
    pub label: String,
    pub y_label: String,
    pub x_label: Option<String>,
    pub plotter: Plotter,
    pub color: Option<String>,
    pub digits_after_decimal: Option<u32>,
    pub include_zero: bool,
    pub labels_kmb: bool,
    pub range_selector: bool,
}

impl SeriesMeta {
    fn new(plotter: Plotter, label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            y_label: y_label.into(),
            x_label: None,
            plotter,
            color: None,
            digits_after_decimal: None,
            include_zero: false,
            labels_kmb: false,
            range_selector: false,
        }
    }

    pub fn line(label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self::new(Plotter::Line, label, y_label)
    }

    pub fn bar(label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self::new(Plotter::Bar, label, y_label)
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits_after_decimal = Some(digits);
        self
    }

    pub fn with_x_label(mut self, label: &str) -> Self {
        self.x_label = Some(label.to_string());
        self
    }

    pub fn with_zero(mut self) -> Self {
        self.include_zero = true;
        self
    }

    pub fn with_kmb(mut self) -> Self {
        self.labels_kmb = true;
        self
    }

    pub fn with_range_selector(mut self) -> Self {
        self.range_selector = true;
        self
    }
}

/// Renderer options, serialized with the camelCase keys dygraphs expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub labels: Vec<String>,
    pub ylabel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<String>,
    pub plotter: Plotter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digits_after_decimal: Option<u32>,
    pub include_zero: bool,
    #[serde(rename = "labelsKMB")]
    pub labels_kmb: bool,
    #[serde(rename = "labelsUTC")]
    pub labels_utc: bool,
    pub show_range_selector: bool,
    /// `[start, end]` in epoch milliseconds.
    pub date_window: [i64; 2],
    pub legend: String,
    pub max_number_width: u32,
    pub axes: ChartAxes,
}

/// Per-axis renderer options.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label_width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartAxes {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

impl Default for ChartAxes {
    /// No vertical grid lines; a y-axis wide enough for K/M/B labels.
    fn default() -> Self {
        Self {
            x: AxisOptions {
                draw_grid: Some(false),
                ..Default::default()
            },
            y: AxisOptions {
                axis_label_width: Some(Y_AXIS_LABEL_WIDTH),
                ..Default::default()
            },
        }
    }
}

// ─── Series ──────────────────────────────────────────────────────────────────

/// A time-sorted series with its visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: [String; 2],
    pub points: Vec<SeriesPoint>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tuple-of-arrays form: times and values as parallel columns.
    pub fn columns(&self) -> (Vec<DateTime<Utc>>, Vec<f64>) {
        self.points.iter().map(|p| (p.time, p.value)).unzip()
    }

    /// `(x, y)` rows with x in epoch milliseconds.
    pub fn rows(&self) -> Vec<(i64, f64)> {
        self.points
            .iter()
            .map(|p| (p.time.timestamp_millis(), p.value))
            .collect()
    }

    /// CSV with a `Date,<label>` header and RFC 3339 times.
    pub fn to_csv(&self) -> String {
        let mut csv = format!("{},{}\n", self.labels[0], self.labels[1]);
        for p in &self.points {
            csv.push_str(&format!("{},{}\n", p.time.to_rfc3339(), p.value));
        }
        csv
    }
}

/// A shaped series ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub series: ChartSeries,
    pub options: ChartOptions,
}

// ─── Shaper ──────────────────────────────────────────────────────────────────

pub struct SeriesShaper;

impl SeriesShaper {
    /// Shape `points` for display.
    ///
    /// Non-finite values are dropped, then points are stably sorted by time.
    /// Nothing left to plot is reported as [`FetchError::Empty`].
    pub fn shape(points: Vec<SeriesPoint>, meta: SeriesMeta) -> Result<Chart, FetchError> {
        let mut points: Vec<SeriesPoint> =
            points.into_iter().filter(|p| p.value.is_finite()).collect();
        points.sort_by_key(|p| p.time);

        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(FetchError::Empty(NO_DATA_MESSAGE.to_string()));
        };
        let (start, end) = (first.time, last.time);

        let labels = [TIME_LABEL.to_string(), meta.label.clone()];
        let options = ChartOptions {
            labels: labels.to_vec(),
            ylabel: meta.y_label,
            xlabel: meta.x_label,
            plotter: meta.plotter,
            colors: meta.color.into_iter().collect(),
            digits_after_decimal: meta.digits_after_decimal,
            include_zero: meta.include_zero,
            labels_kmb: meta.labels_kmb,
            labels_utc: true,
            show_range_selector: meta.range_selector,
            date_window: [start.timestamp_millis(), end.timestamp_millis()],
            legend: LEGEND.to_string(),
            max_number_width: MAX_NUMBER_WIDTH,
            axes: ChartAxes::default(),
        };

        Ok(Chart {
            series: ChartSeries {
                labels,
                points,
                start,
                end,
            },
            options,
        })
    }
}
