use crate::{
    config::ChartConfig,
    model::{Cell, MONTH_ABBREVIATIONS},
    scale::BandScale,
};

/// Axis-aligned rectangle in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Grid geometry: one x band per year, one y band per month.
#[derive(Debug, Clone)]
pub struct Layout {
    config: ChartConfig,
    x: BandScale<i32>,
    y: BandScale<u32>,
}

impl Layout {
    /// `years` must be sorted ascending; they become the x bands left to right.
    pub fn new(years: Vec<i32>, config: &ChartConfig) -> Self {
        Self {
            x: BandScale::new(years, config.margin, config.cell_width),
            y: BandScale::new((0..12).collect(), config.margin, config.cell_height),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn years(&self) -> &[i32] {
        self.x.domain()
    }

    pub fn grid_width(&self) -> f64 {
        self.x.extent()
    }

    pub fn grid_height(&self) -> f64 {
        self.y.extent()
    }

    pub fn width(&self) -> f64 {
        self.config.margin + self.grid_width() + self.config.margin
    }

    pub fn height(&self) -> f64 {
        self.config.margin
            + self.grid_height()
            + self.config.margin
            + self.config.legend_gap
            + self.config.legend_height
            + self.config.tick_gap
    }

    pub fn cell_rect(&self, year: i32, month: u32) -> Option<Rect> {
        Some(Rect {
            x: self.x.position(&year)?,
            y: self.y.position(&month)?,
            width: self.x.bandwidth(),
            height: self.y.bandwidth(),
        })
    }

    pub fn rect_of(&self, cell: &Cell) -> Option<Rect> {
        self.cell_rect(cell.year, cell.month)
    }

    /// The (year, month) band pair under a chart pixel.
    pub fn locate(&self, x: f64, y: f64) -> Option<(i32, u32)> {
        Some((*self.x.invert(x)?, *self.y.invert(y)?))
    }

    /// Year labels with the x centre of their band.
    pub fn x_ticks(&self) -> Vec<(f64, String)> {
        self.years()
            .iter()
            .filter_map(|year| {
                let x = self.x.position(year)?;
                Some((x + self.x.bandwidth() / 2.0, year.to_string()))
            })
            .collect()
    }

    /// Month abbreviations with the y centre of their band.
    pub fn y_ticks(&self) -> Vec<(f64, &'static str)> {
        MONTH_ABBREVIATIONS
            .iter()
            .enumerate()
            .filter_map(|(month, name)| {
                let y = self.y.position(&(month as u32))?;
                Some((y + self.y.bandwidth() / 2.0, *name))
            })
            .collect()
    }

    /// Top-left corner of the legend bar; it spans the grid width.
    pub fn legend_origin(&self) -> (f64, f64) {
        (
            self.config.margin,
            self.config.margin + self.grid_height() + self.config.margin + self.config.legend_gap,
        )
    }
}
