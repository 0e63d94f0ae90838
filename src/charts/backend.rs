//! Plotting backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown backend: {0} (expected png, svg or window)")]
pub struct UnknownBackend(pub String);

/// Where charts are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Raster image file.
    #[default]
    Png,
    /// Vector image file.
    Svg,
    /// Interactive desktop window.
    #[serde(alias = "gui", alias = "interactive")]
    Window,
}

impl Backend {
    /// Extension of the output file, `None` for the window backend.
    pub fn file_extension(self) -> Option<&'static str> {
        match self {
            Backend::Png => Some("png"),
            Backend::Svg => Some("svg"),
            Backend::Window => None,
        }
    }

    pub fn is_interactive(self) -> bool {
        self == Backend::Window
    }

    /// Map the requested backend onto one this build can drive.
    ///
    /// Builds without the `gui` feature fall back to PNG output.
    pub fn resolve(self) -> Backend {
        if self == Backend::Window && !cfg!(feature = "gui") {
            warn!("window backend unavailable in this build, rendering PNG instead");
            return Backend::Png;
        }
        self
    }
}

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Backend::Png),
            "svg" => Ok(Backend::Svg),
            "window" | "gui" | "interactive" => Ok(Backend::Window),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Png => "png",
            Backend::Svg => "svg",
            Backend::Window => "window",
        };
        f.write_str(name)
    }
}
