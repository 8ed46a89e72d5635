//! GUI module - interactive chart window

mod app;
mod chart_viewer;

pub use app::{show, ViewerError};
pub use chart_viewer::ChartViewer;
