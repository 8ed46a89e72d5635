//! Chart Viewer Widget
//! Interactive rendering of a `Chart` using egui_plot.
//!
//! egui_plot has no logarithmic axis, so x values are plotted as their
//! base-10 logarithm and the tick formatter maps them back to bytes.

use crate::charts::{AxisScale, Chart, Series};
use crate::config::{Marker, Rgb};
use egui::{Color32, RichText};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

const LINE_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 4.0;

/// Central panel content: title plus the comparison plot.
pub struct ChartViewer {
    chart: Chart,
}

impl ChartViewer {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&self.chart.title).size(20.0).strong());
        });
        ui.add_space(8.0);

        let log_x = self.chart.x_scale == AxisScale::Log10;
        let mut plot = Plot::new("allocation_chart")
            .x_axis_label(self.chart.x_label.clone())
            .y_axis_label(self.chart.y_label.clone())
            .show_grid(self.chart.grid)
            .x_axis_formatter(move |mark, _range| {
                if log_x {
                    format_size_tick(10f64.powf(mark.value))
                } else {
                    format_size_tick(mark.value)
                }
            })
            .label_formatter(move |name, value| {
                let x = if log_x { 10f64.powf(value.x) } else { value.x };
                if name.is_empty() {
                    format!("{} B\n{:.6} s", format_size_tick(x), value.y)
                } else {
                    format!("{name}\n{} B\n{:.6} s", format_size_tick(x), value.y)
                }
            });
        if self.chart.legend {
            plot = plot.legend(Legend::default().position(Corner::LeftTop));
        }

        let series = &self.chart.series;
        plot.show(ui, |plot_ui| {
            for s in series {
                let color = to_color32(s.color);
                plot_ui.line(
                    Line::new(PlotPoints::new(plot_points(s, log_x)))
                        .color(color)
                        .width(LINE_WIDTH)
                        .name(&s.label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::new(plot_points(s, log_x)))
                        .shape(marker_shape(s.marker))
                        .radius(MARKER_RADIUS)
                        .filled(true)
                        .color(color)
                        .name(&s.label),
                );
            }
        });
    }
}

/// Series points in plot coordinates.
pub fn plot_points(series: &Series, log_x: bool) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .map(|&(x, y)| if log_x { [x.log10(), y] } else { [x, y] })
        .collect()
}

/// Byte-size tick label: whole bytes from 1 upward, two decimals below.
pub fn format_size_tick(bytes: f64) -> String {
    if bytes >= 1.0 {
        format!("{}", bytes.round() as u64)
    } else {
        format!("{bytes:.2}")
    }
}

pub fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::Triangle => MarkerShape::Up,
        Marker::Cross => MarkerShape::Cross,
    }
}

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series {
        Series {
            label: "r_malloc".to_string(),
            marker: Marker::Circle,
            color: Rgb(1, 2, 3),
            points: vec![(10.0, 0.1), (100.0, 0.2), (1000.0, 0.3)],
        }
    }

    #[test]
    fn log_points_use_exponents() {
        let pts = plot_points(&series(), true);
        let xs: Vec<f64> = pts.iter().map(|p| p[0]).collect();
        for (x, expected) in xs.iter().zip([1.0, 2.0, 3.0]) {
            assert!((x - expected).abs() < 1e-12);
        }
        assert_eq!(pts[1][1], 0.2);
    }

    #[test]
    fn linear_points_pass_through() {
        let pts = plot_points(&series(), false);
        assert_eq!(pts, vec![[10.0, 0.1], [100.0, 0.2], [1000.0, 0.3]]);
    }

    #[test]
    fn ticks_round_to_bytes() {
        assert_eq!(format_size_tick(10f64.powf(3.0)), "1000");
        assert_eq!(format_size_tick(8192.0000001), "8192");
        assert_eq!(format_size_tick(0.5), "0.50");
    }

    #[test]
    fn markers_and_colors_map() {
        assert_eq!(marker_shape(Marker::Square), MarkerShape::Square);
        assert_eq!(marker_shape(Marker::Triangle), MarkerShape::Up);
        assert_eq!(to_color32(Rgb(10, 20, 30)), Color32::from_rgb(10, 20, 30));
    }
}
