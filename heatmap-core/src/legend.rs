use std::fmt::Write;

use crate::color::{Color, TemperatureScale};

pub const LEGEND_STOPS: usize = 11;
pub const LEGEND_TICKS: usize = 5;

/// Horizontal gradient bar for the fixed temperature domain.
///
/// Does not depend on the display mode; it is drawn once.
#[derive(Debug, Clone)]
pub struct Legend {
    scale: TemperatureScale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Fraction along the bar, 0.0..=1.0.
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub offset: f64,
    pub label: String,
}

impl Legend {
    pub fn new(scale: TemperatureScale) -> Self {
        Self { scale }
    }

    pub fn stops(&self) -> Vec<GradientStop> {
        let (cold, hot) = self.scale.domain();
        (0..LEGEND_STOPS)
            .map(|i| {
                let offset = i as f64 / (LEGEND_STOPS - 1) as f64;
                GradientStop {
                    offset,
                    color: self.scale.color(cold + (hot - cold) * offset),
                }
            })
            .collect()
    }

    pub fn ticks(&self) -> Vec<Tick> {
        let (cold, hot) = self.scale.domain();
        (0..LEGEND_TICKS)
            .map(|i| {
                let offset = i as f64 / (LEGEND_TICKS - 1) as f64;
                let value = cold + (hot - cold) * offset;
                Tick {
                    value,
                    offset,
                    label: format!("{value}°C"),
                }
            })
            .collect()
    }

    /// SVG fragment: gradient definition, bar and tick axis, bar top-left at `(x, y)`.
    pub fn to_svg(&self, x: f64, y: f64, width: f64, height: f64) -> String {
        let mut svg = String::new();

        svg.push_str(r#"<g class="legend"><defs><linearGradient id="legend-gradient" x1="0%" x2="100%" y1="0%" y2="0%">"#);
        for stop in self.stops() {
            let _ = write!(
                svg,
                r#"<stop offset="{:.0}%" stop-color="{}"/>"#,
                stop.offset * 100.0,
                stop.color
            );
        }
        svg.push_str("</linearGradient></defs>");

        let _ = write!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="url(#legend-gradient)"/>"#
        );

        let axis_y = y + height;
        let _ = write!(
            svg,
            "<line x1=\"{x}\" y1=\"{axis_y}\" x2=\"{}\" y2=\"{axis_y}\" stroke=\"#333\"/>",
            x + width
        );
        for tick in self.ticks() {
            let tx = x + width * tick.offset;
            let _ = write!(
                svg,
                "<line x1=\"{tx}\" y1=\"{axis_y}\" x2=\"{tx}\" y2=\"{}\" stroke=\"#333\"/>\
                 <text x=\"{tx}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\">{}</text>",
                axis_y + 6.0,
                axis_y + 18.0,
                tick.label
            );
        }
        svg.push_str("</g>");
        svg
    }
}
