use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use heatmap_core::{
    ChartController, Config, FileSource, InvalidRowPolicy, Mode, ParsedDataset, html,
    load_dataset,
};
use inquire::{CustomType, Select, Text};
use tracing::{info, warn};

const PAGE_TITLE: &str = "Monthly temperatures";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "heatmap", version, about = "Year × month temperature heatmap")]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the default input file, row policy and chart geometry.
    Configure,

    /// Render the heatmap to a standalone HTML page (or bare SVG).
    Render {
        /// CSV file with date,max_temperature,min_temperature columns.
        input: Option<PathBuf>,

        /// Output file; defaults to the input name with .html/.svg.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of most recent years to show.
        #[arg(long)]
        years: Option<u32>,

        /// Initial display mode: max or min.
        #[arg(long, default_value = "max")]
        mode: String,

        /// Write only the SVG, without the interactive page.
        #[arg(long)]
        svg: bool,

        /// Fail on the first invalid row instead of skipping it.
        #[arg(long)]
        strict: bool,
    },

    /// Print the aggregated monthly cells.
    Cells {
        input: Option<PathBuf>,

        #[arg(long)]
        years: Option<u32>,

        /// Print as JSON instead of a table.
        #[arg(long)]
        json: bool,

        #[arg(long)]
        strict: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Render {
                input,
                output,
                years,
                mode,
                svg,
                strict,
            } => render(input, output, years, &mode, svg, strict).await,
            Command::Cells {
                input,
                years,
                json,
                strict,
            } => cells(input, years, json, strict).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let default_input = cfg
        .default_input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let input = Text::new("Default CSV input:")
        .with_default(&default_input)
        .prompt()
        .context("Failed to read default input")?;
    cfg.default_input = (!input.trim().is_empty()).then(|| PathBuf::from(input.trim()));

    let policy = Select::new(
        "Invalid rows:",
        vec![InvalidRowPolicy::Skip, InvalidRowPolicy::Reject],
    )
    .with_starting_cursor(match cfg.invalid_rows {
        InvalidRowPolicy::Skip => 0,
        InvalidRowPolicy::Reject => 1,
    })
    .prompt()
    .context("Failed to read invalid row policy")?;
    cfg.invalid_rows = policy;

    cfg.chart.years = CustomType::<u32>::new("Years to show:")
        .with_default(cfg.chart.years)
        .prompt()
        .context("Failed to read year window")?;
    cfg.chart.cell_width = CustomType::<f64>::new("Cell width (px):")
        .with_default(cfg.chart.cell_width)
        .prompt()
        .context("Failed to read cell width")?;
    cfg.chart.cell_height = CustomType::<f64>::new("Cell height (px):")
        .with_default(cfg.chart.cell_height)
        .prompt()
        .context("Failed to read cell height")?;

    cfg.chart.validate()?;
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn load(cfg: &Config, input: Option<PathBuf>, strict: bool) -> Result<(PathBuf, ParsedDataset)> {
    let path = cfg.input_path(input)?;
    let policy = if strict {
        InvalidRowPolicy::Reject
    } else {
        cfg.invalid_rows
    };

    let parsed = load_dataset(&FileSource::new(&path), policy).await?;
    if !parsed.rejected.is_empty() {
        warn!(
            "Skipped {} of {} rows in {}",
            parsed.rejected.len(),
            parsed.rows_read,
            path.display()
        );
    }
    Ok((path, parsed))
}

async fn render(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    years: Option<u32>,
    mode: &str,
    svg_only: bool,
    strict: bool,
) -> Result<()> {
    let mut cfg = Config::load()?;
    if let Some(years) = years {
        cfg.chart.years = years;
    }
    let mode = Mode::try_from(mode)?;

    let input_path = cfg.input_path(input)?;
    let output = output.unwrap_or_else(|| {
        input_path.with_extension(if svg_only { "svg" } else { "html" })
    });

    let mut chart = match load(&cfg, Some(input_path), strict)
        .await
        .and_then(|(_, parsed)| ChartController::from_records(&parsed.records, &cfg.chart))
    {
        Ok(chart) => chart,
        Err(err) => {
            fs::write(&output, error_output(&format!("{err:#}"), svg_only))
                .with_context(|| format!("Failed to write error output: {}", output.display()))?;
            warn!("Wrote error output to {}", output.display());
            return Err(err);
        }
    };

    if chart.current_mode() != mode {
        chart.toggle();
    }

    let contents = if svg_only {
        chart.render_svg()
    } else {
        html::render_page(&chart, PAGE_TITLE)
    };
    fs::write(&output, contents)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    info!(
        cells = chart.cells().len(),
        years = chart.layout().years().len(),
        "Wrote heatmap: {}",
        output.display()
    );
    Ok(())
}

/// Replacement for the chart when loading fails, in the requested output format.
fn error_output(message: &str, svg_only: bool) -> String {
    if svg_only {
        html::render_error_svg(message)
    } else {
        html::render_error_page(PAGE_TITLE, message)
    }
}

async fn cells(input: Option<PathBuf>, years: Option<u32>, json: bool, strict: bool) -> Result<()> {
    let mut cfg = Config::load()?;
    if let Some(years) = years {
        cfg.chart.years = years;
    }

    let (path, parsed) = load(&cfg, input, strict).await?;
    let chart = ChartController::from_records(&parsed.records, &cfg.chart)?;

    if json {
        println!("{}", chart.cells_json()?);
        return Ok(());
    }

    println!("{} ({} cells)", path.display(), chart.cells().len());
    println!("{:<6} {:<5} {:>5} {:>8} {:>8}  days", "year", "month", "n", "avg max", "avg min");
    for cell in chart.cells() {
        let first = cell.days.first().map(|d| d.date.day()).unwrap_or_default();
        let last = cell.days.last().map(|d| d.date.day()).unwrap_or_default();
        println!(
            "{:<6} {:<5} {:>5} {:>8.1} {:>8.1}  {first}-{last}",
            cell.year,
            cell.month_name(),
            cell.days.len(),
            cell.avg_max,
            cell.avg_min,
        );
    }
    Ok(())
}
