//! perfgraph - Performance Log Loader & Chart Generator
//!
//! Loads a performance-log CSV and renders its metrics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perfgraph::charts::{Backend, PlotStyle, RenderOptions, StaticChartRenderer};
use perfgraph::config::{Overrides, Settings};
use perfgraph::data::{DataProcessor, PerfLogLoader};
use perfgraph::stats::{ColumnStats, StatsCalculator};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "perfgraph", version, about = "Load a performance log CSV and chart it")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Performance log CSV (default: test/performance/perf_log.csv)
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Plotting backend: png, svg or window
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Plot style: seaborn, classic or ggplot
    #[arg(long, global = true)]
    style: Option<PlotStyle>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print table shape, column types and per-metric statistics
    Info,
    /// Render the metrics with the selected backend
    Plot {
        /// Output directory for file backends
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Comma separated metric columns (default: all numeric)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Plot a random subset of N rows
        #[arg(long)]
        sample: Option<usize>,

        /// Seed for --sample
        #[arg(long)]
        seed: Option<u64>,

        /// Plot z-scores instead of raw values
        #[arg(long)]
        zscore: bool,

        /// Open the written file with the system viewer
        #[arg(long)]
        open: bool,
    },
}

fn main() -> Result<()> {
    // Setup logging
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    let mut overrides = Overrides {
        csv_path: cli.csv,
        backend: cli.backend,
        style: cli.style,
        ..Default::default()
    };

    match cli.command {
        Commands::Info => {
            settings.apply_overrides(overrides);
            run_info(&settings)
        }
        Commands::Plot {
            out,
            columns,
            sample,
            seed,
            zscore,
            open,
        } => {
            overrides.output_dir = out;
            overrides.columns = columns;
            overrides.sample = sample;
            overrides.seed = seed;
            overrides.zscore = zscore;
            overrides.open_output = open;
            settings.apply_overrides(overrides);
            run_plot(&settings)
        }
    }
}

fn load(settings: &Settings) -> Result<PerfLogLoader> {
    let mut loader = PerfLogLoader::new();
    loader
        .load_csv(&settings.csv_path)
        .with_context(|| format!("loading {}", settings.csv_path.display()))?;
    Ok(loader)
}

fn run_info(settings: &Settings) -> Result<()> {
    let loader = load(settings)?;
    let df = loader.dataframe().context("no table loaded")?;

    println!("{}: {}", settings.csv_path.display(), loader.shape());
    for (name, dtype) in loader.column_types() {
        println!("  {name:<24} {dtype}");
    }

    let columns = loader.numeric_columns();
    if columns.is_empty() {
        println!("no numeric columns");
        return Ok(());
    }

    let stats = StatsCalculator::compute_all_stats_parallel(df, &columns)?;
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &[ColumnStats]) {
    println!();
    println!(
        "{:<24} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "metric", "n", "mean", "median", "std", "p05", "p95"
    );
    for s in stats {
        println!(
            "{:<24} {:>8} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            s.name, s.count, s.mean, s.median, s.std, s.p05, s.p95
        );
    }
}

fn run_plot(settings: &Settings) -> Result<()> {
    let loader = load(settings)?;
    let df = loader.dataframe().context("no table loaded")?;

    let backend = settings.backend.resolve();
    info!(%backend, style = %settings.style, "plot settings");

    let columns = DataProcessor::select_columns(df, &settings.columns)?;
    if columns.is_empty() {
        anyhow::bail!("no numeric columns to plot");
    }

    let mut frame = match settings.sample {
        Some(n) => DataProcessor::sample_rows(df, n, settings.seed)?,
        None => df.clone(),
    };

    if backend.is_interactive() {
        return run_window(frame, settings);
    }

    if settings.zscore {
        frame = DataProcessor::standardize(&frame, &columns)?;
    }
    let series = DataProcessor::metric_series(&frame, &columns)?;

    let stem = settings
        .csv_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "perf_log".to_string());
    let stem = if settings.zscore {
        format!("{stem}_zscore")
    } else {
        stem
    };

    fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("creating {}", settings.output_dir.display()))?;
    let path = StaticChartRenderer::output_path(&settings.output_dir, &stem, backend)
        .context("backend does not write files")?;

    let options = RenderOptions {
        title: format!("Performance log: {}", settings.csv_path.display()),
        y_desc: if settings.zscore { "z-score" } else { "value" }.to_string(),
        style: settings.style,
        size: (settings.width, settings.height),
    };
    StaticChartRenderer::render(&series, &options, &path, backend)?;
    println!("{}", path.display());

    if settings.open_output {
        open::that(&path).with_context(|| format!("opening {}", path.display()))?;
    }
    Ok(())
}

#[cfg(feature = "gui")]
fn run_window(frame: polars::prelude::DataFrame, settings: &Settings) -> Result<()> {
    perfgraph::gui::run_viewer(frame, settings).map_err(|e| anyhow::anyhow!("viewer: {e}"))
}

#[cfg(not(feature = "gui"))]
fn run_window(_frame: polars::prelude::DataFrame, _settings: &Settings) -> Result<()> {
    // resolve() never yields Window without the gui feature
    anyhow::bail!("window backend not available in this build")
}
