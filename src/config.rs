//! Run settings: defaults, an optional JSON config file, then CLI overrides.

use crate::charts::{Backend, PlotStyle};
use crate::data::DEFAULT_LOG_PATH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for one run. Every field may be omitted from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub csv_path: PathBuf,
    pub backend: Backend,
    pub style: PlotStyle,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Plot a random subset of this many rows.
    pub sample: Option<usize>,
    pub seed: Option<u64>,
    /// Plot z-scores instead of raw values.
    pub zscore: bool,
    /// Metrics to plot; empty means every numeric column.
    pub columns: Vec<String>,
    pub open_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_LOG_PATH),
            backend: Backend::default(),
            style: PlotStyle::default(),
            output_dir: PathBuf::from("perf_plots"),
            width: 1200,
            height: 800,
            sample: None,
            seed: None,
            zscore: false,
            columns: Vec::new(),
            open_output: false,
        }
    }
}

/// Values given on the command line; `None`/`false` leaves the setting alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub csv_path: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub style: Option<PlotStyle>,
    pub output_dir: Option<PathBuf>,
    pub sample: Option<usize>,
    pub seed: Option<u64>,
    pub zscore: bool,
    pub columns: Vec<String>,
    pub open_output: bool,
}

impl Settings {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), ?settings, "loaded config file");
        Ok(settings)
    }

    /// Defaults, or the config file when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, cli: Overrides) {
        if let Some(csv_path) = cli.csv_path {
            self.csv_path = csv_path;
        }
        if let Some(backend) = cli.backend {
            self.backend = backend;
        }
        if let Some(style) = cli.style {
            self.style = style;
        }
        if let Some(output_dir) = cli.output_dir {
            self.output_dir = output_dir;
        }
        if cli.sample.is_some() {
            self.sample = cli.sample;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if !cli.columns.is_empty() {
            self.columns = cli.columns;
        }
        self.zscore |= cli.zscore;
        self.open_output |= cli.open_output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_point_at_perf_log() {
        let settings = Settings::default();
        assert_eq!(settings.csv_path, PathBuf::from("test/performance/perf_log.csv"));
        assert_eq!(settings.style, PlotStyle::Seaborn);
        assert_eq!(settings.backend, Backend::Png);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(r#"{ "style": "ggplot", "sample": 500 }"#);
        let settings = Settings::from_json_file(file.path()).unwrap();

        assert_eq!(settings.style, PlotStyle::Ggplot);
        assert_eq!(settings.sample, Some(500));
        assert_eq!(settings.width, 1200);
        assert_eq!(settings.csv_path, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn backend_aliases_are_accepted() {
        let file = write_config(r#"{ "backend": "gui" }"#);
        let settings = Settings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.backend, Backend::Window);
    }

    #[test]
    fn unknown_style_is_a_parse_error() {
        let file = write_config(r#"{ "style": "xkcd" }"#);
        let err = Settings::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::from_json_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn cli_overrides_win() {
        let mut settings = Settings {
            style: PlotStyle::Ggplot,
            sample: Some(10),
            ..Default::default()
        };
        settings.apply_overrides(Overrides {
            style: Some(PlotStyle::Classic),
            zscore: true,
            columns: vec!["elapsed_ms".into()],
            ..Default::default()
        });

        assert_eq!(settings.style, PlotStyle::Classic);
        assert_eq!(settings.sample, Some(10));
        assert!(settings.zscore);
        assert_eq!(settings.columns, vec!["elapsed_ms"]);
    }
}
