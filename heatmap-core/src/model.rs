use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month abbreviations in calendar order, independent of locale.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One day of readings, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub max: f64,
    pub min: f64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, max: f64, min: f64) -> Self {
        Self { date, max, min }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Zero-based month of year.
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }
}

/// Aggregated summary of one (year, month) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub year: i32,
    /// Zero-based, 0 = January.
    pub month: u32,
    pub avg_max: f64,
    pub avg_min: f64,
    /// Sorted by date, never empty.
    pub days: Vec<DailyRecord>,
}

impl Cell {
    pub fn month_name(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month as usize % 12]
    }

    /// Average for the given display mode.
    pub fn value(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Max => self.avg_max,
            Mode::Min => self.avg_min,
        }
    }
}

/// Which monthly average the chart currently colors by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Max,
    Min,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Max => "max",
            Mode::Min => "min",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Max => Mode::Min,
            Mode::Min => Mode::Max,
        }
    }

    /// Text of the mode indicator shown next to the chart.
    pub fn label(&self) -> String {
        format!("Showing: average {} temperature (click chart to toggle)", self.as_str())
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Mode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "max" => Ok(Mode::Max),
            "min" => Ok(Mode::Min),
            _ => Err(anyhow::anyhow!("Unknown mode '{value}'. Supported modes: max, min.")),
        }
    }
}
