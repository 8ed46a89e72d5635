//! Chart configuration
//! Defaults reproduce the allocator comparison chart; a JSON file may
//! override any subset of fields.

use crate::data::{MALLOC_COLUMN, R_MALLOC_COLUMN, SIZE_COLUMN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT: &str = "benchmark_results.csv";
pub const DEFAULT_OUTPUT: &str = "benchmark_results.png";
pub const DEFAULT_TITLE: &str = "Memory Allocation Performance Between Malloc & r_malloc";
pub const DEFAULT_X_LABEL: &str = "Allocation Size (Bytes)";
pub const DEFAULT_Y_LABEL: &str = "Time (Secs)";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config must define at least one series")]
    NoSeries,
}

/// Point marker drawn at every measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Cross,
}

/// RGB color shared by the static and interactive backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const PALETTE: [Rgb; 4] = [
    Rgb(31, 119, 180),  // Blue
    Rgb(255, 127, 14),  // Orange
    Rgb(44, 160, 44),   // Green
    Rgb(214, 39, 40),   // Red
];

/// One y-column to plot against the x-column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub column: String,
    /// Legend text; falls back to the column name.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_marker")]
    pub marker: Marker,
    #[serde(default)]
    pub color: Option<Rgb>,
}

fn default_marker() -> Marker {
    Marker::Circle
}

impl SeriesConfig {
    pub fn new(column: &str, marker: Marker) -> Self {
        Self {
            column: column.to_string(),
            label: Some(column.to_string()),
            marker,
            color: None,
        }
    }

    pub fn legend_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.column)
    }
}

/// Everything the renderer needs besides the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub x_column: String,
    pub series: Vec<SeriesConfig>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: bool,
    pub grid: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_column: SIZE_COLUMN.to_string(),
            series: vec![
                SeriesConfig::new(R_MALLOC_COLUMN, Marker::Circle),
                SeriesConfig::new(MALLOC_COLUMN, Marker::Square),
            ],
            title: DEFAULT_TITLE.to_string(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            legend: true,
            grid: true,
            width: 1280,
            height: 720,
        }
    }
}

impl ChartConfig {
    /// Read a JSON config; fields it leaves out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.series.is_empty() {
            return Err(ConfigError::NoSeries);
        }
        Ok(())
    }

    /// Color for the series at `index`, explicit or from the palette.
    pub fn series_color(&self, index: usize) -> Rgb {
        self.series
            .get(index)
            .and_then(|s| s.color)
            .unwrap_or(PALETTE[index % PALETTE.len()])
    }
}
