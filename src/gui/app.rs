//! Viewer Application
//! Single-window eframe app hosting the chart viewer.

use crate::charts::Chart;
use crate::gui::ChartViewer;
use eframe::egui;
use thiserror::Error;
use tracing::info;

const APP_NAME: &str = "allocplot";

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("interactive viewer failed: {0}")]
    Eframe(String),
}

/// Main application window.
pub struct ChartApp {
    chart_viewer: ChartViewer,
}

impl ChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, chart: Chart) -> Self {
        Self {
            chart_viewer: ChartViewer::new(chart),
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Open `chart` in a native window and block until it is closed.
pub fn show(chart: Chart, size: (u32, u32)) -> Result<(), ViewerError> {
    let (width, height) = size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([480.0, 320.0])
            .with_title(chart.title.clone()),
        ..Default::default()
    };

    info!(series = chart.series.len(), "opening chart viewer");
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ChartApp::new(cc, chart)))),
    )
    .map_err(|e| ViewerError::Eframe(e.to_string()))
}
