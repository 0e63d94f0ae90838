//! GUI module - Interactive window backend

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{run_viewer, PerfGraphApp};
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
