//! Benchmark Table Module
//! Immutable columnar view over the measurements read from CSV.

use crate::data::LoadError;
use std::collections::HashMap;

/// Column holding the allocation size in bytes.
pub const SIZE_COLUMN: &str = "Size";
/// Column holding the custom allocator timings.
pub const R_MALLOC_COLUMN: &str = "r_malloc";
/// Column holding the libc allocator timings.
pub const MALLOC_COLUMN: &str = "malloc";

/// Benchmark measurements keyed by column name.
///
/// Every column has the same length and row `i` of each column belongs to
/// the same measured allocation size.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
    rows: usize,
}

impl BenchmarkTable {
    /// Build a table from named columns, keeping header order.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, LoadError> {
        let rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut by_name = HashMap::with_capacity(columns.len());

        for (name, values) in columns {
            if values.len() != rows {
                return Err(LoadError::RaggedColumn {
                    column: name,
                    expected: rows,
                    found: values.len(),
                });
            }
            if by_name.contains_key(&name) {
                return Err(LoadError::DuplicateColumn { column: name });
            }
            names.push(name.clone());
            by_name.insert(name, values);
        }

        Ok(Self {
            names,
            columns: by_name,
            rows,
        })
    }

    /// Values of a column, in row order.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BenchmarkTable {
        BenchmarkTable::from_columns(vec![
            (SIZE_COLUMN.to_string(), vec![8.0, 16.0, 32.0]),
            (R_MALLOC_COLUMN.to_string(), vec![0.001, 0.002, 0.004]),
            (MALLOC_COLUMN.to_string(), vec![0.0015, 0.0025, 0.0045]),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_header_order_and_rows() {
        let table = sample();
        assert_eq!(table.column_names(), &["Size", "r_malloc", "malloc"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column("malloc"), Some(&[0.0015, 0.0025, 0.0045][..]));
        assert!(table.column("free").is_none());
    }

    #[test]
    fn rejects_unequal_columns() {
        let err = BenchmarkTable::from_columns(vec![
            ("Size".to_string(), vec![8.0, 16.0]),
            ("malloc".to_string(), vec![0.1]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::RaggedColumn { ref column, expected: 2, found: 1 } if column == "malloc"
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = BenchmarkTable::from_columns(vec![
            ("Size".to_string(), vec![8.0]),
            ("Size".to_string(), vec![16.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn { .. }));
    }

    #[test]
    fn empty_table() {
        let table = BenchmarkTable::from_columns(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }
}
