//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::style::{PlotStyle, Rgb};
use crate::data::MetricSeries;
use crate::stats::ColumnStats;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

/// Draws metric charts and the stats table inside egui.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Draw all series on one plot; X is the row index.
    pub fn draw_metric_chart(
        ui: &mut egui::Ui,
        series: &[MetricSeries],
        style: PlotStyle,
        y_label: &str,
        height: f32,
    ) {
        Plot::new("perf_metrics")
            .height(height)
            .legend(Legend::default())
            .x_axis_label("Row")
            .y_axis_label(y_label)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, metric) in series.iter().enumerate() {
                    let color = Self::color(style.series_color(i));
                    let points: PlotPoints = metric.points.iter().map(|&(x, y)| [x, y]).collect();

                    if metric.points.len() == 1 {
                        plot_ui.points(
                            Points::new(points)
                                .radius(3.0)
                                .color(color)
                                .name(&metric.name),
                        );
                    } else {
                        plot_ui.line(
                            Line::new(points)
                                .color(color)
                                .width(1.5)
                                .name(&metric.name),
                        );
                    }
                }
            });
    }

    /// Draw statistics table
    pub fn draw_stats_table(ui: &mut egui::Ui, stats: &[ColumnStats], style: PlotStyle) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id("perf_stats_table"))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Metric", "N", "Mean", "Median", "Std", "Min", "Max", "P05", "P95",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for (i, cs) in stats.iter().enumerate() {
                            let color = Self::color(style.series_color(i));
                            ui.label(RichText::new(&cs.name).size(11.0).color(color));
                            ui.label(RichText::new(cs.count.to_string()).size(11.0));
                            for value in
                                [cs.mean, cs.median, cs.std, cs.min, cs.max, cs.p05, cs.p95]
                            {
                                ui.label(RichText::new(format!("{:.3}", value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
