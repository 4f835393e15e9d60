//! Click-to-toggle and hover state of a rendered chart.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::{
    aggregate::{aggregate, distinct_years, temperature_extent},
    color::{Color, TemperatureScale},
    config::ChartConfig,
    filter::filter_last_years,
    layout::Layout,
    model::{Cell, DailyRecord, Mode},
    render::SvgRenderer,
    sparkline::SparklineBuilder,
};

/// How long cells take to fade to their new color after a toggle.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(400);

/// Tooltip offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -28.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillChange {
    pub year: i32,
    pub month: u32,
    pub from: Color,
    pub to: Color,
}

/// Result of a click: the new mode and the animated recolor it triggers.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub mode: Mode,
    pub label: String,
    pub duration: Duration,
    pub changes: Vec<FillChange>,
}

/// Owns the aggregated cells, their geometry and the display mode.
#[derive(Debug, Clone)]
pub struct ChartController {
    cells: Vec<Cell>,
    layout: Layout,
    sparklines: SparklineBuilder,
    scale: TemperatureScale,
    mode: Mode,
    tooltip: Option<Tooltip>,
}

impl ChartController {
    /// Filter `records` to the configured year window, aggregate and lay out.
    pub fn from_records(records: &[DailyRecord], config: &ChartConfig) -> Result<Self> {
        let recent = filter_last_years(records, config.years);
        debug!(total = records.len(), kept = recent.len(), years = config.years, "filtered records");
        Self::new(aggregate(&recent), config)
    }

    pub fn new(cells: Vec<Cell>, config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        let extent = temperature_extent(&cells)
            .ok_or_else(|| anyhow!("Dataset contains no valid daily readings to chart"))?;

        let layout = Layout::new(distinct_years(&cells), config);
        debug!(
            cells = cells.len(),
            years = layout.years().len(),
            low = extent.low,
            high = extent.high,
            "laid out chart"
        );

        Ok(Self {
            sparklines: SparklineBuilder::new(extent, config),
            layout,
            cells,
            scale: TemperatureScale::new(),
            mode: Mode::default(),
            tooltip: None,
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scale(&self) -> &TemperatureScale {
        &self.scale
    }

    pub fn sparklines(&self) -> &SparklineBuilder {
        &self.sparklines
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn mode_label(&self) -> String {
        self.mode.label()
    }

    pub fn cell(&self, year: i32, month: u32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.year == year && c.month == month)
    }

    pub fn fill_for(&self, cell: &Cell) -> Color {
        self.scale.color(cell.value(self.mode))
    }

    pub fn fill_at(&self, year: i32, month: u32) -> Option<Color> {
        self.cell(year, month).map(|c| self.fill_for(c))
    }

    /// Click anywhere on the chart: flip the mode and recolor every cell.
    pub fn toggle(&mut self) -> Transition {
        let before: Vec<Color> = self.cells.iter().map(|c| self.fill_for(c)).collect();

        self.mode = self.mode.toggled();
        self.scale = TemperatureScale::new();

        let changes = self
            .cells
            .iter()
            .zip(before)
            .map(|(cell, from)| FillChange {
                year: cell.year,
                month: cell.month,
                from,
                to: self.fill_for(cell),
            })
            .collect();

        debug!(mode = %self.mode, "toggled display mode");

        Transition {
            mode: self.mode,
            label: self.mode_label(),
            duration: TRANSITION_DURATION,
            changes,
        }
    }

    /// Pointer moved to `(x, y)` in chart pixels.
    ///
    /// Over a cell the tooltip shows that cell's average for the mode active
    /// right now; anywhere else the tooltip is hidden.
    pub fn hover(&mut self, x: f64, y: f64) -> Option<&Tooltip> {
        let text = self
            .layout
            .locate(x, y)
            .and_then(|(year, month)| self.cell(year, month))
            .map(|cell| {
                format!(
                    "{} {}: {:.1}°C (avg {})",
                    cell.month_name(),
                    cell.year,
                    cell.value(self.mode),
                    self.mode
                )
            });

        self.tooltip = text.map(|text| Tooltip {
            text,
            x: x + TOOLTIP_OFFSET.0,
            y: y + TOOLTIP_OFFSET.1,
        });
        self.tooltip.as_ref()
    }

    pub fn pointer_out(&mut self) {
        self.tooltip = None;
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Aggregated cells as pretty-printed JSON.
    pub fn cells_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.cells).context("Failed to serialize cells to JSON")
    }

    /// SVG for the current mode.
    pub fn render_svg(&self) -> String {
        SvgRenderer {
            layout: &self.layout,
            scale: &self.scale,
            sparklines: &self.sparklines,
        }
        .render(&self.cells, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn synthetic_years(years: &[i32], max: f64, min: f64) -> Vec<DailyRecord> {
        years
            .iter()
            .flat_map(|&y| {
                (1..=12).flat_map(move |m| {
                    (1..=28).map(move |d| {
                        DailyRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), max, min)
                    })
                })
            })
            .collect()
    }

    fn controller() -> ChartController {
        ChartController::from_records(&synthetic_years(&[2020, 2021], 30.0, 20.0), &ChartConfig::default())
            .unwrap()
    }

    #[test]
    fn two_years_of_constant_data_end_to_end() {
        let mut chart = controller();

        assert_eq!(chart.cells().len(), 24);
        assert!(chart.cells().iter().all(|c| c.avg_max == 30.0 && c.avg_min == 20.0));

        let scale = TemperatureScale::new();
        assert_eq!(chart.current_mode(), Mode::Max);
        assert!(chart.cells().iter().all(|c| chart.fill_for(c) == scale.color(30.0)));

        let transition = chart.toggle();
        assert_eq!(transition.mode, Mode::Min);
        assert_eq!(transition.duration, Duration::from_millis(400));
        assert_eq!(transition.changes.len(), 24);
        assert!(chart.cells().iter().all(|c| chart.fill_for(c) == scale.color(20.0)));
        assert_eq!(chart.mode_label(), Mode::Min.label());
        assert!(chart.mode_label().contains("min"));
    }

    #[test]
    fn toggling_twice_restores_fills_and_label() {
        let mut chart = ChartController::from_records(
            &[
                DailyRecord::new(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), 12.0, 1.0),
                DailyRecord::new(NaiveDate::from_ymd_opt(2021, 8, 1).unwrap(), 33.0, 19.0),
            ],
            &ChartConfig::default(),
        )
        .unwrap();

        let fills: Vec<Color> = chart.cells().iter().map(|c| chart.fill_for(c)).collect();
        let label = chart.mode_label();

        let first = chart.toggle();
        let second = chart.toggle();

        let after: Vec<Color> = chart.cells().iter().map(|c| chart.fill_for(c)).collect();
        assert_eq!(after, fills);
        assert_eq!(chart.mode_label(), label);
        assert_eq!(second.mode, Mode::Max);
        for (a, b) in first.changes.iter().zip(&second.changes) {
            assert_eq!(a.from, b.to);
            assert_eq!(a.to, b.from);
        }
    }

    #[test]
    fn tooltip_reads_the_mode_at_hover_time() {
        let mut chart = controller();
        let rect = chart.layout().cell_rect(2021, 1).unwrap();
        let (x, y) = (rect.x + 5.0, rect.y + 5.0);

        let tip = chart.hover(x, y).cloned().unwrap();
        assert_eq!(tip.text, "Feb 2021: 30.0°C (avg max)");
        assert_eq!((tip.x, tip.y), (x + 10.0, y - 28.0));

        chart.toggle();
        let tip = chart.hover(x, y).cloned().unwrap();
        assert_eq!(tip.text, "Feb 2021: 20.0°C (avg min)");

        chart.pointer_out();
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn hovering_outside_cells_hides_tooltip() {
        let mut chart = controller();
        let rect = chart.layout().cell_rect(2020, 0).unwrap();
        assert!(chart.hover(rect.x + 1.0, rect.y + 1.0).is_some());
        assert!(chart.hover(1.0, 1.0).is_none());
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn sparse_grid_has_no_tooltip_in_empty_months() {
        let mut chart = ChartController::from_records(
            &[
                DailyRecord::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 12.0, 1.0),
                DailyRecord::new(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(), 33.0, 19.0),
            ],
            &ChartConfig::default(),
        )
        .unwrap();
        let empty = chart.layout().cell_rect(2020, 5).unwrap();
        assert!(chart.hover(empty.x + 1.0, empty.y + 1.0).is_none());
        assert_eq!(chart.fill_at(2020, 5), None);
    }

    #[test]
    fn single_day_month_renders() {
        let chart = ChartController::from_records(
            &[DailyRecord::new(NaiveDate::from_ymd_opt(2022, 9, 14).unwrap(), 21.5, 11.0)],
            &ChartConfig::default(),
        )
        .unwrap();

        let cell = chart.cell(2022, 8).unwrap();
        assert_eq!(cell.avg_max, 21.5);
        let line = chart.sparklines().build(cell);
        assert_eq!(line.max_points.len(), 1);
        assert!(chart.render_svg().contains(r#"class="sparkline""#));
    }

    #[test]
    fn window_limits_years_on_the_x_axis() {
        let years: Vec<i32> = (2000..=2020).collect();
        let chart = ChartController::from_records(
            &synthetic_years(&years, 25.0, 10.0),
            &ChartConfig::default(),
        )
        .unwrap();
        assert_eq!(chart.layout().years(), (2011..=2020).collect::<Vec<_>>().as_slice());
        assert_eq!(chart.cells().len(), 120);
    }

    #[test]
    fn cells_serialize_with_dates() {
        let chart = ChartController::from_records(
            &[DailyRecord::new(NaiveDate::from_ymd_opt(2022, 9, 14).unwrap(), 21.5, 11.0)],
            &ChartConfig::default(),
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&chart.cells_json().unwrap()).unwrap();
        assert_eq!(json[0]["year"], 2022);
        assert_eq!(json[0]["month"], 8);
        assert_eq!(json[0]["days"][0]["date"], "2022-09-14");
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let err = ChartController::from_records(&[], &ChartConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no valid daily readings"));
    }
}
