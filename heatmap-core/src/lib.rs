//! Core library for the `heatmap` CLI.
//!
//! This crate defines:
//! - Parsing, year filtering and monthly aggregation of daily temperature rows
//! - The fixed temperature color scale and its legend
//! - Grid layout, sparklines and SVG rendering
//! - The click/hover interaction state and the standalone HTML page
//! - Dataset sources and on-disk configuration
//!
//! It is used by `heatmap-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod color;
pub mod config;
pub mod filter;
pub mod html;
pub mod interaction;
pub mod layout;
pub mod legend;
pub mod model;
pub mod parse;
pub mod render;
pub mod scale;
pub mod source;
pub mod sparkline;

pub use color::{Color, TemperatureScale};
pub use config::{ChartConfig, Config};
pub use interaction::{ChartController, Tooltip, Transition};
pub use model::{Cell, DailyRecord, Mode};
pub use parse::{InvalidRowPolicy, ParsedDataset};
pub use source::{DatasetSource, FileSource, InlineSource, load_dataset};
