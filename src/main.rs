//! allocplot - Allocator Benchmark Comparison Chart
//!
//! Reads allocator timings from CSV, plots `r_malloc` against libc `malloc`
//! over allocation size on a logarithmic axis, saves the chart and shows it.

mod charts;
mod config;
mod data;
mod gui;

use anyhow::{Context, Result};
use charts::{ChartPlotter, StaticChartRenderer};
use clap::Parser;
use config::{ChartConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use data::DataLoader;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{
    filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Parser, Debug)]
#[command(version, about = "Plot r_malloc vs malloc benchmark timings")]
struct Cli {
    /// Benchmark CSV with Size, r_malloc and malloc columns
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Chart image to write (png, jpg, bmp or svg)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// JSON chart configuration overriding labels, series and size
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Do not open the interactive viewer
    #[arg(long, default_value_t = false)]
    no_show: bool,
    /// Open the saved image with the system default application
    #[arg(long, default_value_t = false)]
    open: bool,
    /// Extra tracing filter directives
    #[arg(short, long)]
    log: Vec<String>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(&args.log)?;
    run(&args)
}

fn init_logging(directives: &[String]) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let mut env_filter = EnvFilter::new(base_directives(rust_log.as_deref()));
    for directive in directives {
        env_filter = env_filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("invalid log directive '{directive}'"))?,
        );
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer().compact())
        .init();
    Ok(())
}

/// A bare level in `RUST_LOG` applies to this crate; full directives are
/// used as given.
fn base_directives(rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        None | Some("") => "allocplot=info".to_owned(),
        Some(level) if level.parse::<LevelFilter>().is_ok() => format!("allocplot={level}"),
        Some(directives) => directives.to_owned(),
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = load_config(args)?;
    let size = (config.width, config.height);

    let table = DataLoader::load_csv(&args.input).context("failed to load benchmark table")?;
    let chart = ChartPlotter::build(&table, &config).context("failed to build chart")?;

    let saved = StaticChartRenderer::save(&chart, Some(args.output.as_path()), size)
        .context("failed to save chart")?;
    info!(path = %saved.display(), "wrote chart");

    if args.open {
        if let Err(err) = open::that(&saved) {
            warn!(path = %saved.display(), "could not open saved chart: {err}");
        }
    }

    if !args.no_show {
        if let Err(err @ gui::ViewerError::Eframe(_)) = gui::show(chart, size) {
            warn!("{err}; chart was saved to {}", saved.display());
        }
    }
    Ok(())
}

fn load_config(args: &Cli) -> Result<ChartConfig> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_file(path).context("failed to load chart config")?,
        None => ChartConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    Ok(config)
}
