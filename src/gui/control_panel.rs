//! Control Panel Widget
//! Left side panel with metric selection and display settings.

use crate::charts::{ChartPlotter, PlotStyle};
use crate::data::TableShape;
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::path::PathBuf;

/// Actions triggered from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    StyleChanged,
}

/// Left side control panel with column toggles.
pub struct ControlPanel {
    pub csv_path: PathBuf,
    pub shape: TableShape,
    pub columns: Vec<String>,
    pub selected: Vec<bool>,
    pub zscore: bool,
    pub style: PlotStyle,
}

impl ControlPanel {
    pub fn new(
        csv_path: PathBuf,
        shape: TableShape,
        columns: Vec<String>,
        preselected: &[String],
        zscore: bool,
        style: PlotStyle,
    ) -> Self {
        let selected = columns
            .iter()
            .map(|c| preselected.is_empty() || preselected.contains(c))
            .collect();
        Self {
            csv_path,
            shape,
            columns,
            selected,
            zscore,
            style,
        }
    }

    /// Get selected metric columns
    pub fn selected_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|(col, _)| col.clone())
            .collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("perfgraph")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Data Source =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        let file_name = self
            .csv_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.csv_path.display().to_string());
        ui.label(RichText::new(file_name).size(12.0));
        ui.label(
            RichText::new(self.shape.to_string())
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(8.0);
        ui.separator();

        // ===== Display =====
        ui.label(RichText::new("Display").size(14.0).strong());
        if ui.checkbox(&mut self.zscore, "Z-score").changed() {
            action = ControlPanelAction::SelectionChanged;
        }

        let before = self.style;
        ComboBox::from_label("Style")
            .selected_text(self.style.name())
            .show_ui(ui, |ui| {
                for style in [PlotStyle::Seaborn, PlotStyle::Classic, PlotStyle::Ggplot] {
                    ui.selectable_value(&mut self.style, style, style.name());
                }
            });
        if self.style != before {
            action = ControlPanelAction::StyleChanged;
        }
        ui.add_space(8.0);
        ui.separator();

        // ===== Metrics =====
        ui.label(RichText::new("Metrics").size(14.0).strong());
        ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
            let mut color_idx = 0;
            for (name, selected) in self.columns.iter().zip(self.selected.iter_mut()) {
                let text = if *selected {
                    let color = ChartPlotter::color(self.style.series_color(color_idx));
                    color_idx += 1;
                    RichText::new(name).color(color)
                } else {
                    RichText::new(name)
                };
                if ui.checkbox(selected, text).changed() {
                    action = ControlPanelAction::SelectionChanged;
                }
            }
        });

        action
    }
}
