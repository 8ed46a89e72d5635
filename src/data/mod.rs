//! Data module - CSV loading and the in-memory benchmark table

mod loader;
mod table;

pub use loader::{DataLoader, LoadError};
pub use table::{BenchmarkTable, MALLOC_COLUMN, R_MALLOC_COLUMN, SIZE_COLUMN};
