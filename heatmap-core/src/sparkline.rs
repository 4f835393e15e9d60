//! In-cell daily max/min line traces.

use std::fmt::Write;

use crate::{aggregate::TemperatureExtent, config::ChartConfig, model::Cell, scale::LinearScale};

pub const MAX_LINE_OPACITY: f64 = 0.9;
pub const MIN_LINE_OPACITY: f64 = 0.5;

/// Points of one cell's two traces, in cell-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    pub max_points: Vec<(f64, f64)>,
    pub min_points: Vec<(f64, f64)>,
}

/// Builds sparklines that all share one temperature axis.
#[derive(Debug, Clone)]
pub struct SparklineBuilder {
    y: LinearScale,
    x_range: (f64, f64),
}

impl SparklineBuilder {
    /// `extent` must cover every day drawn with this builder.
    pub fn new(extent: TemperatureExtent, config: &ChartConfig) -> Self {
        let inset = config.sparkline_inset;
        Self {
            y: LinearScale::new(
                (extent.low, extent.high),
                (config.cell_height - inset, inset),
            ),
            x_range: (inset, config.cell_width - inset),
        }
    }

    /// Cell-local y of a temperature; identical for every cell.
    pub fn y(&self, celsius: f64) -> f64 {
        self.y.apply(celsius)
    }

    pub fn build(&self, cell: &Cell) -> Sparkline {
        let x = LinearScale::new((1.0, cell.days.len() as f64), self.x_range);

        let (max_points, min_points): (Vec<_>, Vec<_>) = cell
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let px = x.apply((i + 1) as f64);
                ((px, self.y(day.max)), (px, self.y(day.min)))
            })
            .unzip();

        Sparkline {
            max_points,
            min_points,
        }
    }

    /// SVG group translated to the cell's corner; ignores pointer events.
    pub fn to_svg(&self, sparkline: &Sparkline, origin: (f64, f64)) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<g class="sparkline" transform="translate({},{})" pointer-events="none">"#,
            origin.0, origin.1
        );
        for (points, opacity) in [
            (&sparkline.max_points, MAX_LINE_OPACITY),
            (&sparkline.min_points, MIN_LINE_OPACITY),
        ] {
            let _ = write!(
                svg,
                "<path d=\"{}\" fill=\"none\" stroke=\"#000\" stroke-width=\"1\" stroke-opacity=\"{opacity}\"/>",
                path_data(points)
            );
        }
        svg.push_str("</g>");
        svg
    }
}

fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{x:.2},{y:.2}");
    }
    d
}
