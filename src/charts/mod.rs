//! Charts module - Styles, backends and chart rendering

mod backend;
#[cfg(feature = "gui")]
mod plotter;
mod renderer;
mod style;

pub use backend::{Backend, UnknownBackend};
#[cfg(feature = "gui")]
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, RenderOptions, StaticChartRenderer};
pub use style::{PlotStyle, Rgb, UnknownStyle};
