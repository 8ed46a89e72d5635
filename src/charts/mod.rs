//! Charts module - chart model and static rendering

mod plotter;
mod renderer;

pub use plotter::{AxisScale, Chart, ChartPlotter, RenderError, Series};
pub use renderer::StaticChartRenderer;
