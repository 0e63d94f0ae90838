//! Static Chart Renderer
//! Draws performance metrics to PNG or SVG files with plotters.
//!
//! Layout:
//! 1. Figure title centered at the top
//! 2. One panel per metric, up to three per row
//! 3. Each panel: styled background, grid, metric line over row index

use crate::charts::backend::Backend;
use crate::charts::style::{PlotStyle, Rgb};
use crate::data::MetricSeries;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const MAX_PANEL_COLUMNS: usize = 3;
const RANGE_PADDING: f64 = 0.05;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No series to plot")]
    NoSeries,
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Pixel buffer does not match image size")]
    Buffer,
    #[error("The window backend does not produce files")]
    Interactive,
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn rgb((r, g, b): Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

/// Text and layout options for one figure.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub y_desc: String,
    pub style: PlotStyle,
    pub size: (u32, u32),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Output file for a figure, `None` for the window backend.
    pub fn output_path(dir: &Path, stem: &str, backend: Backend) -> Option<PathBuf> {
        backend
            .file_extension()
            .map(|ext| dir.join(format!("{stem}.{ext}")))
    }

    /// Render every series into one figure file.
    pub fn render(
        series: &[MetricSeries],
        options: &RenderOptions,
        path: &Path,
        backend: Backend,
    ) -> Result<(), RenderError> {
        if series.is_empty() {
            return Err(RenderError::NoSeries);
        }

        let (width, height) = options.size;
        match backend {
            Backend::Png => {
                let mut buffer = vec![0u8; width as usize * height as usize * 3];
                {
                    let root =
                        BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
                    Self::draw(&root, series, options)?;
                    root.present().map_err(draw_err)?;
                }
                let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer)?;
                img.save(path)?;
            }
            Backend::Svg => {
                let root = SVGBackend::new(path, (width, height)).into_drawing_area();
                Self::draw(&root, series, options)?;
                root.present().map_err(draw_err)?;
            }
            Backend::Window => return Err(RenderError::Interactive),
        }

        info!(path = %path.display(), panels = series.len(), %backend, "chart written");
        Ok(())
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        series: &[MetricSeries],
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let style = options.style;
        let text = rgb(style.text_color());
        let grid = rgb(style.grid_color());
        let panel_bg = rgb(style.panel_background());
        let axis = if style.draws_frame() { text } else { panel_bg };

        root.fill(&rgb(style.figure_background())).map_err(draw_err)?;
        let root = root
            .titled(
                &options.title,
                ("sans-serif", 26).into_font().color(&text),
            )
            .map_err(draw_err)?;

        let (rows, cols) = Self::grid_dims(series.len());
        let panels = root.split_evenly((rows, cols));

        for (i, (panel, metric)) in panels.iter().zip(series).enumerate() {
            let color = rgb(style.series_color(i));
            let xs: Vec<f64> = metric.points.iter().map(|&(x, _)| x).collect();
            let (x_min, x_max) = Self::value_range(&xs);
            let (y_min, y_max) = Self::value_range(&metric.values());

            let mut chart = ChartBuilder::on(panel)
                .caption(&metric.name, ("sans-serif", 16).into_font().color(&text))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(55)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(draw_err)?;

            chart.plotting_area().fill(&panel_bg).map_err(draw_err)?;

            chart
                .configure_mesh()
                .bold_line_style(grid)
                .light_line_style(grid.mix(0.4))
                .axis_style(axis)
                .label_style(("sans-serif", 11).into_font().color(&text))
                .x_desc("row")
                .y_desc(options.y_desc.as_str())
                .draw()
                .map_err(draw_err)?;

            chart
                .draw_series(LineSeries::new(
                    metric.points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?;

            if metric.points.len() == 1 {
                chart
                    .draw_series(
                        metric
                            .points
                            .iter()
                            .map(|&p| Circle::new(p, 3, color.filled())),
                    )
                    .map_err(draw_err)?;
            }
        }

        Ok(())
    }

    /// Panel grid (rows, columns) for `n` metrics.
    pub fn grid_dims(n: usize) -> (usize, usize) {
        if n == 0 {
            return (0, 0);
        }
        let cols = n.min(MAX_PANEL_COLUMNS);
        (n.div_ceil(cols), cols)
    }

    /// Axis range covering all values with a small margin.
    ///
    /// Empty input gives 0..1; a single distinct value is widened so the range is never empty.
    pub fn value_range(values: &[f64]) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }

        if min.is_infinite() {
            return (0.0, 1.0);
        }
        if min == max {
            let half = if min == 0.0 { 0.5 } else { min.abs() * 0.5 };
            return (min - half, max + half);
        }

        let pad = (max - min) * RANGE_PADDING;
        (min - pad, max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, (0, 0))]
    #[case(1, (1, 1))]
    #[case(3, (1, 3))]
    #[case(4, (2, 3))]
    #[case(7, (3, 3))]
    fn grid_layout(#[case] n: usize, #[case] expected: (usize, usize)) {
        assert_eq!(StaticChartRenderer::grid_dims(n), expected);
    }

    #[test]
    fn value_range_pads_span() {
        let (lo, hi) = StaticChartRenderer::value_range(&[0.0, 10.0, 5.0]);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn value_range_degenerate_cases() {
        assert_eq!(StaticChartRenderer::value_range(&[]), (0.0, 1.0));
        assert_eq!(StaticChartRenderer::value_range(&[f64::NAN]), (0.0, 1.0));
        assert_eq!(StaticChartRenderer::value_range(&[0.0, 0.0]), (-0.5, 0.5));
        assert_eq!(StaticChartRenderer::value_range(&[4.0]), (2.0, 6.0));
    }

    #[test]
    fn output_path_uses_backend_extension() {
        let dir = Path::new("out");
        assert_eq!(
            StaticChartRenderer::output_path(dir, "perf_log", Backend::Svg),
            Some(PathBuf::from("out/perf_log.svg"))
        );
        assert_eq!(
            StaticChartRenderer::output_path(dir, "perf_log", Backend::Window),
            None
        );
    }

    #[test]
    fn empty_series_is_rejected() {
        let options = RenderOptions {
            title: "t".into(),
            y_desc: "value".into(),
            style: PlotStyle::Seaborn,
            size: (100, 100),
        };
        let err = StaticChartRenderer::render(&[], &options, Path::new("x.png"), Backend::Png)
            .unwrap_err();
        assert!(matches!(err, RenderError::NoSeries));
    }
}
