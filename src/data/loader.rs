//! CSV Data Loader Module
//! Reads the benchmark CSV into a `BenchmarkTable` using Polars.

use crate::data::BenchmarkTable;
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("column '{column}' in {} is not numeric", path.display())]
    NonNumeric { path: PathBuf, column: String },
    #[error("column '{column}' in {} has an empty cell", path.display())]
    MissingValue { path: PathBuf, column: String },
    #[error("no data rows in {}", path.display())]
    Empty { path: PathBuf },
    #[error("column '{column}' has {found} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("column '{column}' appears more than once")]
    DuplicateColumn { column: String },
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a comma-delimited benchmark file.
    ///
    /// The file handle is moved into the CSV reader and closed when the
    /// reader is dropped, whether parsing succeeds or not.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<BenchmarkTable, LoadError> {
        let path = file_path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(path = %path.display(), "opened benchmark file");

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let table = Self::table_from_dataframe(&df, path)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            names = ?table.column_names(),
            "loaded benchmark table"
        );
        Ok(table)
    }

    /// Convert every column of a DataFrame to `f64`, rejecting non-numeric
    /// columns and nulls.
    fn table_from_dataframe(df: &DataFrame, path: &Path) -> Result<BenchmarkTable, LoadError> {
        if df.height() == 0 {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let mut columns = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            let name = col.name().to_string();
            if !Self::is_numeric(col.dtype()) {
                return Err(LoadError::NonNumeric {
                    path: path.to_path_buf(),
                    column: name,
                });
            }
            if col.null_count() > 0 {
                return Err(LoadError::MissingValue {
                    path: path.to_path_buf(),
                    column: name,
                });
            }

            let parse_err = |source: PolarsError| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            };
            let as_f64 = col.cast(&DataType::Float64).map_err(parse_err)?;
            let values = as_f64
                .f64()
                .map_err(parse_err)?
                .into_iter()
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| LoadError::MissingValue {
                    path: path.to_path_buf(),
                    column: name.clone(),
                })?;
            columns.push((name, values));
        }

        BenchmarkTable::from_columns(columns)
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }
}
