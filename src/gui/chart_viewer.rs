//! Chart Viewer Widget
//! Central panel showing the metric chart and its statistics.

use crate::charts::{ChartPlotter, PlotStyle};
use crate::data::MetricSeries;
use crate::stats::ColumnStats;
use egui::{RichText, ScrollArea};

const CHART_HEIGHT: f32 = 420.0;

/// Holds the series currently on screen.
#[derive(Default)]
pub struct ChartViewer {
    pub series: Vec<MetricSeries>,
    pub stats: Vec<ColumnStats>,
    pub y_label: String,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(
        &mut self,
        series: Vec<MetricSeries>,
        stats: Vec<ColumnStats>,
        y_label: &str,
    ) {
        self.series = series;
        self.stats = stats;
        self.y_label = y_label.to_string();
    }

    pub fn show(&self, ui: &mut egui::Ui, style: PlotStyle) {
        if self.series.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No metrics selected").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ChartPlotter::draw_metric_chart(
                    ui,
                    &self.series,
                    style,
                    &self.y_label,
                    CHART_HEIGHT,
                );
                ui.add_space(10.0);
                ChartPlotter::draw_stats_table(ui, &self.stats, style);
            });
    }
}
