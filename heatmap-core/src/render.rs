//! SVG rendering of the year × month grid.

use std::fmt::Write;

use crate::{
    color::TemperatureScale,
    layout::Layout,
    legend::Legend,
    model::{Cell, Mode},
    sparkline::SparklineBuilder,
};

pub const SVG_ID: &str = "heatmap";

/// Everything needed to draw one frame of the chart.
pub struct SvgRenderer<'a> {
    pub layout: &'a Layout,
    pub scale: &'a TemperatureScale,
    pub sparklines: &'a SparklineBuilder,
}

impl SvgRenderer<'_> {
    /// Full `<svg>` document with cells filled for `mode`.
    ///
    /// Every cell rect carries both candidate fills as `data-max`/`data-min`
    /// so a page script can recolor without re-rendering.
    pub fn render(&self, cells: &[Cell], mode: Mode) -> String {
        let width = self.layout.width();
        let height = self.layout.height();

        let mut svg = String::with_capacity(cells.len() * 512);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{SVG_ID}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" data-mode="{mode}">"#
        );

        svg.push_str(r#"<g class="cells">"#);
        for cell in cells {
            self.write_cell(&mut svg, cell, mode);
        }
        svg.push_str("</g>");

        svg.push_str(r#"<g class="sparklines">"#);
        for cell in cells {
            if let Some(rect) = self.layout.rect_of(cell) {
                let line = self.sparklines.build(cell);
                svg.push_str(&self.sparklines.to_svg(&line, (rect.x, rect.y)));
            }
        }
        svg.push_str("</g>");

        self.write_axes(&mut svg);

        let (lx, ly) = self.layout.legend_origin();
        svg.push_str(&Legend::new(*self.scale).to_svg(
            lx,
            ly,
            self.layout.grid_width(),
            self.layout.config().legend_height,
        ));

        svg.push_str("</svg>");
        svg
    }

    fn write_cell(&self, svg: &mut String, cell: &Cell, mode: Mode) {
        let Some(rect) = self.layout.rect_of(cell) else {
            return;
        };
        let _ = write!(
            svg,
            "<rect class=\"cell\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" \
             data-year=\"{}\" data-month=\"{}\" data-label=\"{} {}\" \
             data-max=\"{}\" data-min=\"{}\" data-avg-max=\"{:.1}\" data-avg-min=\"{:.1}\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            self.scale.color(cell.value(mode)),
            cell.year,
            cell.month,
            cell.month_name(),
            cell.year,
            self.scale.color(cell.avg_max),
            self.scale.color(cell.avg_min),
            cell.avg_max,
            cell.avg_min,
        );
    }

    fn write_axes(&self, svg: &mut String) {
        let config = self.layout.config();
        let grid_bottom = config.margin + self.layout.grid_height();

        svg.push_str(r#"<g class="axis axis-x" font-size="10" text-anchor="middle">"#);
        for (x, label) in self.layout.x_ticks() {
            let _ = write!(svg, r#"<text x="{x}" y="{}">{label}</text>"#, grid_bottom + 16.0);
        }
        svg.push_str("</g>");

        svg.push_str(r#"<g class="axis axis-y" font-size="10" text-anchor="end" dominant-baseline="middle">"#);
        for (y, label) in self.layout.y_ticks() {
            let _ = write!(svg, r#"<text x="{}" y="{y}">{label}</text>"#, config.margin - 6.0);
        }
        svg.push_str("</g>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::{aggregate, distinct_years, temperature_extent},
        config::ChartConfig,
        model::DailyRecord,
    };
    use chrono::NaiveDate;

    fn cells() -> Vec<Cell> {
        aggregate(&[
            DailyRecord::new(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), 30.0, 10.0),
            DailyRecord::new(NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(), 5.0, -2.0),
        ])
    }

    #[test]
    fn renders_one_rect_and_sparkline_per_cell() {
        let cells = cells();
        let config = ChartConfig::default();
        let layout = Layout::new(distinct_years(&cells), &config);
        let scale = TemperatureScale::new();
        let sparklines = SparklineBuilder::new(temperature_extent(&cells).unwrap(), &config);
        let renderer = SvgRenderer {
            layout: &layout,
            scale: &scale,
            sparklines: &sparklines,
        };

        let svg = renderer.render(&cells, Mode::Max);

        assert_eq!(svg.matches(r#"class="cell""#).count(), 2);
        assert_eq!(svg.matches(r#"class="sparkline""#).count(), 2);
        assert!(svg.contains(&format!(r#"fill="{}""#, scale.color(30.0))));
        assert!(svg.contains(r#"data-label="Jan 2019""#));
        for cell in &cells {
            let attrs = format!(
                r#"data-max="{}" data-min="{}""#,
                scale.color(cell.avg_max),
                scale.color(cell.avg_min)
            );
            assert!(svg.contains(&attrs), "missing {attrs}");
        }
        assert!(svg.contains(r#"data-avg-min="-2.0""#));
        assert!(svg.contains(">2020</text>"));
        assert!(svg.contains(">Dec</text>"));
        assert!(svg.contains(&format!(r#"width="{}""#, layout.width())));
    }

    #[test]
    fn min_mode_fills_with_min_average() {
        let cells = cells();
        let config = ChartConfig::default();
        let layout = Layout::new(distinct_years(&cells), &config);
        let scale = TemperatureScale::new();
        let sparklines = SparklineBuilder::new(temperature_extent(&cells).unwrap(), &config);
        let renderer = SvgRenderer {
            layout: &layout,
            scale: &scale,
            sparklines: &sparklines,
        };

        let svg = renderer.render(&cells, Mode::Min);
        assert!(svg.contains(&format!(r#"fill="{}" data-year="2019""#, scale.color(10.0))));
        assert!(svg.contains(r#"data-mode="min""#));
    }
}
