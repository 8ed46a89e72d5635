//! Static Chart Renderer
//! Draws a `Chart` with plotters and writes it to disk.
//!
//! Bitmap formats (PNG, JPEG, BMP) are drawn into an in-memory RGB buffer
//! and encoded with `image`; SVG is drawn into a string and written once
//! drawing has finished, so a failed render leaves no file behind.

use crate::charts::{Chart, RenderError};
use crate::config::Marker;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FONT: &str = "sans-serif";
const MARKER_SIZE: i32 = 5;
/// Largest accepted width or height in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Output encoding chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bitmap(ImageFormat),
    Svg,
}

impl OutputFormat {
    /// Validate the destination and pick its format.
    pub fn resolve(output: Option<&Path>) -> Result<(PathBuf, Self), RenderError> {
        let path = match output {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => return Err(RenderError::MissingOutputPath),
        };

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let format = match ext.as_deref() {
            Some("png") => Self::Bitmap(ImageFormat::Png),
            Some("jpg") | Some("jpeg") => Self::Bitmap(ImageFormat::Jpeg),
            Some("bmp") => Self::Bitmap(ImageFormat::Bmp),
            Some("svg") => Self::Svg,
            _ => return Err(RenderError::UnsupportedFormat { path }),
        };
        Ok((path, format))
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` at `size` pixels and write it to `output`.
    ///
    /// Returns the path written.
    pub fn save(
        chart: &Chart,
        output: Option<&Path>,
        size: (u32, u32),
    ) -> Result<PathBuf, RenderError> {
        let (path, format) = OutputFormat::resolve(output)?;
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(RenderError::Draw(format!(
                "image size must be non-zero, got {width}x{height}"
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::Draw(format!(
                "image size {width}x{height} exceeds {MAX_DIMENSION}x{MAX_DIMENSION}"
            )));
        }
        debug!(path = %path.display(), ?format, width, height, "rendering chart");

        match format {
            OutputFormat::Svg => {
                let mut svg = String::new();
                {
                    let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
                    Self::draw(chart, &root)?;
                }
                fs::write(&path, svg).map_err(|source| RenderError::WriteIo {
                    path: path.clone(),
                    source,
                })?;
            }
            OutputFormat::Bitmap(image_format) => {
                let mut buffer = vec![0u8; width as usize * height as usize * 3];
                {
                    let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
                    Self::draw(chart, &root)?;
                }
                let img = RgbImage::from_raw(width, height, buffer)
                    .ok_or_else(|| RenderError::Draw("frame buffer size mismatch".to_string()))?;
                img.save_with_format(&path, image_format)
                    .map_err(|source| RenderError::Write {
                        path: path.clone(),
                        source,
                    })?;
            }
        }

        info!(path = %path.display(), "chart saved");
        Ok(path)
    }

    /// Draw the full chart onto any plotters backend.
    fn draw<DB: DrawingBackend>(
        chart: &Chart,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 28))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 90)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(chart.x_range().log_scale(), chart.y_range())
            .map_err(draw_err)?;

        let x_fmt = |x: &f64| format!("{x:.0}");
        let y_fmt = |y: &f64| format!("{y:.2e}");
        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_label_style((FONT, 16))
            .y_label_style((FONT, 16));
        if !chart.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(draw_err)?;

        for series in &chart.series {
            let color = RGBColor(series.color.0, series.color.1, series.color.2);
            let points = series.points.iter().copied();

            let anno = ctx
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                .map_err(draw_err)?;
            if chart.legend {
                anno.label(series.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x - 10, y), (x + 10, y)], color.stroke_width(2))
                });
            }

            match series.marker {
                Marker::Circle => {
                    ctx.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, color.filled())))
                        .map_err(draw_err)?;
                }
                Marker::Square => {
                    ctx.draw_series(points.map(|p| {
                        EmptyElement::at(p)
                            + Rectangle::new(
                                [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                                color.filled(),
                            )
                    }))
                    .map_err(draw_err)?;
                }
                Marker::Triangle => {
                    ctx.draw_series(
                        points.map(|p| TriangleMarker::new(p, MARKER_SIZE, color.filled())),
                    )
                    .map_err(draw_err)?;
                }
                Marker::Cross => {
                    ctx.draw_series(
                        points.map(|p| Cross::new(p, MARKER_SIZE, color.stroke_width(2))),
                    )
                    .map_err(draw_err)?;
                }
            }
        }

        if chart.legend {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8).filled())
                .border_style(&BLACK)
                .label_font((FONT, 18))
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartPlotter;
    use crate::config::ChartConfig;
    use crate::data::BenchmarkTable;

    fn chart() -> Chart {
        let table = BenchmarkTable::from_columns(vec![
            ("Size".to_string(), vec![8.0, 16.0, 32.0]),
            ("r_malloc".to_string(), vec![0.001, 0.002, 0.004]),
            ("malloc".to_string(), vec![0.0015, 0.0025, 0.0045]),
        ])
        .unwrap();
        ChartPlotter::build(&table, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn omitted_output_path_is_an_error() {
        let err = StaticChartRenderer::save(&chart(), None, (640, 480)).unwrap_err();
        assert!(matches!(err, RenderError::MissingOutputPath));
    }

    #[test]
    fn empty_output_path_is_an_error() {
        let err = StaticChartRenderer::save(&chart(), Some(Path::new("")), (640, 480)).unwrap_err();
        assert!(matches!(err, RenderError::MissingOutputPath));
    }

    #[test]
    fn format_follows_extension() {
        let cases = [
            ("benchmark_results.png", OutputFormat::Bitmap(ImageFormat::Png)),
            ("out/chart.JPG", OutputFormat::Bitmap(ImageFormat::Jpeg)),
            ("chart.jpeg", OutputFormat::Bitmap(ImageFormat::Jpeg)),
            ("chart.bmp", OutputFormat::Bitmap(ImageFormat::Bmp)),
            ("chart.svg", OutputFormat::Svg),
        ];
        for (name, expected) in cases {
            let (path, format) = OutputFormat::resolve(Some(Path::new(name))).unwrap();
            assert_eq!(path, PathBuf::from(name));
            assert_eq!(format, expected, "{name}");
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        for name in ["chart.gif", "chart", "chart.csv"] {
            let err = OutputFormat::resolve(Some(Path::new(name))).unwrap_err();
            assert!(matches!(err, RenderError::UnsupportedFormat { .. }), "{name}");
        }
    }

    #[test]
    fn unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.tiff");
        let err = StaticChartRenderer::save(&chart(), Some(&path), (640, 480)).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn writes_png_at_requested_size() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.png");
        let saved = StaticChartRenderer::save(&chart(), Some(&path), (640, 480)).unwrap();
        assert_eq!(saved, path);
        assert!(path.exists());
        let img = image::open(&path).expect("decode png");
        assert_eq!((img.width(), img.height()), (640, 480));
    }

    #[test]
    fn writes_svg_with_title_and_legend() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.svg");
        let mut chart = chart();
        chart.series[1].label = "libc_malloc".to_string();
        let saved = StaticChartRenderer::save(&chart, Some(&path), (800, 600)).unwrap();
        assert_eq!(saved, path);
        let svg = fs::read_to_string(&path).expect("read svg");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Memory Allocation Performance Between Malloc"));
        assert!(svg.contains("r_malloc"));
        assert!(svg.contains("libc_malloc"));
    }

    #[test]
    fn svg_into_missing_directory_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope").join("chart.svg");
        let err = StaticChartRenderer::save(&chart(), Some(&path), (640, 480)).unwrap_err();
        assert!(
            matches!(err, RenderError::WriteIo { path: ref p, .. } if p == &path),
            "{err:?}"
        );
        assert!(err.to_string().contains("chart.svg"));
        assert!(!path.exists());
    }

    #[test]
    fn png_into_missing_directory_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope").join("chart.png");
        let err = StaticChartRenderer::save(&chart(), Some(&path), (640, 480)).unwrap_err();
        assert!(matches!(err, RenderError::Write { path: ref p, .. } if p == &path), "{err:?}");
    }

    #[test]
    fn oversized_image_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.png");
        let err = StaticChartRenderer::save(&chart(), Some(&path), (100_000, 100_000)).unwrap_err();
        assert!(matches!(err, RenderError::Draw(_)));
        assert!(!path.exists());
    }

    #[test]
    fn zero_size_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.png");
        let err = StaticChartRenderer::save(&chart(), Some(&path), (0, 480)).unwrap_err();
        assert!(matches!(err, RenderError::Draw(_)));
        assert!(!path.exists());
    }
}
