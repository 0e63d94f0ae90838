//! Plot styles shared by the static renderer and the interactive viewer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An RGB triple, independent of any drawing backend.
pub type Rgb = (u8, u8, u8);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown plot style: {0} (expected seaborn, classic or ggplot)")]
pub struct UnknownStyle(pub String);

/// Named visual style applied to every chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    /// Grey panel, white grid, "deep" palette.
    #[default]
    Seaborn,
    Classic,
    Ggplot,
}

const SEABORN_DEEP: [Rgb; 10] = [
    (76, 114, 176),
    (221, 132, 82),
    (85, 168, 104),
    (196, 78, 82),
    (129, 114, 179),
    (147, 120, 96),
    (218, 139, 195),
    (140, 140, 140),
    (204, 185, 116),
    (100, 181, 205),
];

const TAB10: [Rgb; 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

const GGPLOT: [Rgb; 7] = [
    (226, 74, 51),
    (52, 138, 189),
    (152, 142, 213),
    (119, 119, 119),
    (251, 193, 94),
    (142, 186, 66),
    (255, 181, 184),
];

impl PlotStyle {
    pub fn name(self) -> &'static str {
        match self {
            PlotStyle::Seaborn => "seaborn",
            PlotStyle::Classic => "classic",
            PlotStyle::Ggplot => "ggplot",
        }
    }

    /// Background of the plotting panel.
    pub fn panel_background(self) -> Rgb {
        match self {
            PlotStyle::Seaborn => (234, 234, 242),
            PlotStyle::Classic => (255, 255, 255),
            PlotStyle::Ggplot => (229, 229, 229),
        }
    }

    /// Background around the panels.
    pub fn figure_background(self) -> Rgb {
        (255, 255, 255)
    }

    pub fn grid_color(self) -> Rgb {
        match self {
            PlotStyle::Classic => (210, 210, 210),
            PlotStyle::Seaborn | PlotStyle::Ggplot => (255, 255, 255),
        }
    }

    pub fn text_color(self) -> Rgb {
        match self {
            PlotStyle::Classic => (0, 0, 0),
            PlotStyle::Seaborn | PlotStyle::Ggplot => (60, 60, 60),
        }
    }

    /// Whether the axis frame is drawn around each panel.
    pub fn draws_frame(self) -> bool {
        matches!(self, PlotStyle::Classic)
    }

    pub fn palette(self) -> &'static [Rgb] {
        match self {
            PlotStyle::Seaborn => &SEABORN_DEEP,
            PlotStyle::Classic => &TAB10,
            PlotStyle::Ggplot => &GGPLOT,
        }
    }

    /// Color for the i-th series, cycling through the palette.
    pub fn series_color(self, index: usize) -> Rgb {
        let palette = self.palette();
        palette[index % palette.len()]
    }
}

impl FromStr for PlotStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seaborn" => Ok(PlotStyle::Seaborn),
            "classic" => Ok(PlotStyle::Classic),
            "ggplot" => Ok(PlotStyle::Ggplot),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
