//! perfgraph Viewer Application
//! Main window with control panel and chart viewer.

use crate::config::Settings;
use crate::data::{DataProcessor, ProcessorError, TableShape};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::StatsCalculator;
use egui::SidePanel;
use polars::prelude::*;
use tracing::{info, warn};

/// Main application window.
pub struct PerfGraphApp {
    df: DataFrame,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    error: Option<String>,
}

impl PerfGraphApp {
    pub fn new(df: DataFrame, settings: &Settings) -> Self {
        let shape = TableShape {
            rows: df.height(),
            columns: df.width(),
        };
        let numeric = DataProcessor::select_columns(&df, &[]).unwrap_or_default();

        let mut app = Self {
            control_panel: ControlPanel::new(
                settings.csv_path.clone(),
                shape,
                numeric,
                &settings.columns,
                settings.zscore,
                settings.style,
            ),
            chart_viewer: ChartViewer::new(),
            df,
            error: None,
        };
        app.refresh();
        app
    }

    /// Rebuild series and stats from the current selection.
    fn refresh(&mut self) {
        match self.build_view() {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!("failed to refresh charts: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    fn build_view(&mut self) -> Result<(), ProcessorError> {
        let columns = self.control_panel.selected_columns();
        let zscore = self.control_panel.zscore;

        let frame = if zscore {
            DataProcessor::standardize(&self.df, &columns)?
        } else {
            self.df.clone()
        };

        let series = DataProcessor::metric_series(&frame, &columns)?;
        let stats = StatsCalculator::compute_all_stats_parallel(&self.df, &columns)?;
        let y_label = if zscore { "z-score" } else { "Value" };

        self.chart_viewer.set_data(series, stats, y_label);
        Ok(())
    }
}

impl eframe::App for PerfGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.refresh(),
                        ControlPanelAction::StyleChanged | ControlPanelAction::None => {}
                    }

                    if let Some(err) = &self.error {
                        ui.add_space(8.0);
                        ui.colored_label(egui::Color32::from_rgb(220, 53, 69), err);
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, self.control_panel.style);
        });
    }
}

/// Open the interactive window on an already loaded table.
pub fn run_viewer(df: DataFrame, settings: &Settings) -> eframe::Result<()> {
    info!(rows = df.height(), "opening viewer window");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("perfgraph"),
        ..Default::default()
    };

    let app = PerfGraphApp::new(df, settings);
    eframe::run_native(
        "perfgraph",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
