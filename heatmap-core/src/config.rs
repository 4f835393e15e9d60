use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{filter::DEFAULT_YEARS, parse::InvalidRowPolicy};

/// Chart geometry and year window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// How many of the most recent years present in the data to show.
    pub years: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub margin: f64,
    pub legend_gap: f64,
    pub legend_height: f64,
    pub tick_gap: f64,
    /// Padding between a cell's border and its sparkline.
    pub sparkline_inset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            years: DEFAULT_YEARS,
            cell_width: 60.0,
            cell_height: 36.0,
            margin: 60.0,
            legend_gap: 30.0,
            legend_height: 12.0,
            tick_gap: 30.0,
            sparkline_inset: 3.0,
        }
    }
}

impl ChartConfig {
    /// Reject geometry that cannot produce a drawable chart.
    pub fn validate(&self) -> Result<()> {
        if self.years == 0 {
            return Err(anyhow!("Chart year window must be at least 1"));
        }
        for (name, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("margin", self.margin),
            ("legend_gap", self.legend_gap),
            ("legend_height", self.legend_height),
            ("tick_gap", self.tick_gap),
            ("sparkline_inset", self.sparkline_inset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!(
                    "Chart setting `{name}` must be a finite, non-negative number, got {value}"
                ));
            }
        }
        if self.cell_width <= 0.0 || self.cell_height <= 0.0 {
            return Err(anyhow!(
                "Cell size must be positive, got {}x{}",
                self.cell_width,
                self.cell_height
            ));
        }
        if self.sparkline_inset * 2.0 >= self.cell_width.min(self.cell_height) {
            return Err(anyhow!(
                "Sparkline inset {} leaves no room inside a {}x{} cell",
                self.sparkline_inset,
                self.cell_width,
                self.cell_height
            ));
        }
        Ok(())
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset used when no input path is given on the command line.
    pub default_input: Option<PathBuf>,

    /// Example TOML:
    /// invalid_rows = "reject"
    pub invalid_rows: InvalidRowPolicy,

    /// Example TOML:
    /// [chart]
    /// years = 10
    /// cell_width = 60.0
    pub chart: ChartConfig,
}

impl Config {
    /// Resolve the dataset path: explicit argument first, then the configured default.
    pub fn input_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit.or_else(|| self.default_input.clone()).ok_or_else(|| {
            anyhow!(
                "No input file given and no default input configured.\n\
                 Hint: pass a CSV path or run `heatmap configure` first."
            )
        })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.chart.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "heatmap", "heatmap-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
