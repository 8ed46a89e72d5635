//! Chart Plotter Module
//! Builds the drawable chart model from a benchmark table.

use crate::config::{ChartConfig, Marker, Rgb};
use crate::data::BenchmarkTable;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("required column '{column}' is missing from the table")]
    MissingColumn { column: String },
    #[error("table has no rows to plot")]
    NoData,
    #[error("x value {value} at row {row} is not strictly positive; log scale is undefined")]
    NonPositiveX { row: usize, value: f64 },
    #[error("no output path given for the chart image")]
    MissingOutputPath,
    #[error("unsupported image format for {}: expected png, jpg, bmp or svg", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to write chart to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write chart to {}: {source}", path.display())]
    WriteIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// X-axis scaling. Only the logarithmic scale is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Log10,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub marker: Marker,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// Drawable chart model shared by the file and window backends.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub legend: bool,
    pub grid: bool,
    pub series: Vec<Series>,
}

impl Chart {
    /// Legend entries in drawing order.
    pub fn legend_entries(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// X bounds padded by a constant factor, so the padding is even on a
    /// log axis.
    pub fn x_range(&self) -> Range<f64> {
        let (min, max) = Self::bounds(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        (min / 1.25)..(max * 1.25)
    }

    /// Y bounds with 10% headroom.
    pub fn y_range(&self) -> Range<f64> {
        let (min, max) = Self::bounds(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));
        let span = max - min;
        let pad = if span > 0.0 {
            span * 0.1
        } else if max != 0.0 {
            max.abs() * 0.1
        } else {
            1.0
        };
        (min - pad)..(max + pad)
    }

    fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_infinite() {
            return (1.0, 1.0);
        }
        (min, max)
    }
}

/// Turns a table and chart settings into a `Chart`.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn build(table: &BenchmarkTable, config: &ChartConfig) -> Result<Chart, RenderError> {
        if table.is_empty() {
            return Err(RenderError::NoData);
        }
        let xs = Self::require(table, &config.x_column)?;
        if let Some((row, &value)) = xs
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(RenderError::NonPositiveX { row, value });
        }

        let series = config
            .series
            .iter()
            .enumerate()
            .map(|(idx, sc)| {
                let ys = Self::require(table, &sc.column)?;
                let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
                debug!(series = sc.legend_label(), points = points.len(), "built series");
                Ok(Series {
                    label: sc.legend_label().to_string(),
                    marker: sc.marker,
                    color: config.series_color(idx),
                    points,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let chart = Chart {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            x_scale: AxisScale::Log10,
            legend: config.legend,
            grid: config.grid,
            series,
        };
        info!(series = ?chart.legend_entries(), rows = table.row_count(), "built chart");
        Ok(chart)
    }

    fn require<'a>(table: &'a BenchmarkTable, column: &str) -> Result<&'a [f64], RenderError> {
        table.column(column).ok_or_else(|| RenderError::MissingColumn {
            column: column.to_string(),
        })
    }
}
