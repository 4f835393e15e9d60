//! Self-contained HTML pages: the interactive chart, or a visible load error.
//!
//! The page embeds the SVG, its CSS and a small script. Clicking the chart
//! swaps every cell between its `data-max` and `data-min` fill; hovering a
//! cell shows a tooltip for the mode active at that moment.

use crate::{interaction::ChartController, interaction::TRANSITION_DURATION, model::Mode};

/// Render the chart as a standalone page, in its current mode.
pub fn render_page(chart: &ChartController, title: &str) -> String {
    let mode = chart.current_mode();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    <p id="mode-label" class="mode-label">{label}</p>
    <div id="chart" class="chart">{svg}</div>
    <div id="tooltip" class="tooltip"></div>
    <script>{js}</script>
</body>
</html>"#,
        title = escape(title),
        css = inline_css(),
        label = escape(&chart.mode_label()),
        svg = chart.render_svg(),
        js = inline_javascript(mode),
    )
}

/// Page shown instead of the chart when the dataset could not be loaded.
pub fn render_error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    <div class="error" role="alert">
        <strong>The temperature data could not be loaded.</strong>
        <pre>{message}</pre>
    </div>
</body>
</html>"#,
        title = escape(title),
        css = inline_css(),
        message = escape(message),
    )
}

/// Bare SVG written in place of the chart when the dataset could not be loaded.
pub fn render_error_svg(message: &str) -> String {
    let lines: Vec<&str> = message.lines().collect();
    let height = 40 + 16 * lines.len();

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" class="heatmap-error" width="640" height="{height}" role="alert">
<rect x="0" y="0" width="640" height="{height}" fill="#fee" stroke="#c00"/>
<text x="12" y="22" font-family="sans-serif" font-size="14" font-weight="bold" fill="#c00">The temperature data could not be loaded.</text>
"##
    );
    for (i, line) in lines.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="12" y="{}" font-family="monospace" font-size="12">{}</text>
"#,
            42 + 16 * i,
            escape(line)
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn inline_css() -> String {
    format!(
        r#"
body {{ font-family: sans-serif; margin: 20px; color: #222; }}
.chart {{ cursor: pointer; }}
.cell {{ stroke: #fff; stroke-width: 1; transition: fill {ms}ms ease; }}
.mode-label {{ font-weight: bold; }}
.tooltip {{ position: absolute; display: none; pointer-events: none; background: rgba(255,255,255,0.95);
    border: 1px solid #999; border-radius: 3px; padding: 4px 6px; font-size: 12px; }}
.error {{ border: 1px solid #c00; background: #fee; padding: 12px; border-radius: 4px; }}
"#,
        ms = TRANSITION_DURATION.as_millis()
    )
}

fn inline_javascript(initial: Mode) -> String {
    format!(
        r#"
(function() {{
    var labels = {{ max: {max_label}, min: {min_label} }};
    var mode = "{initial}";
    var svg = document.getElementById("heatmap");
    var label = document.getElementById("mode-label");
    var tooltip = document.getElementById("tooltip");
    var cells = svg.querySelectorAll("rect.cell");

    svg.addEventListener("click", function() {{
        mode = mode === "max" ? "min" : "max";
        svg.setAttribute("data-mode", mode);
        cells.forEach(function(cell) {{
            cell.style.fill = cell.getAttribute("data-" + mode);
        }});
        label.textContent = labels[mode];
    }});

    cells.forEach(function(cell) {{
        cell.addEventListener("mouseover", function(event) {{
            var value = cell.getAttribute("data-avg-" + mode);
            tooltip.textContent = cell.getAttribute("data-label") + ": " + value + "°C (avg " + mode + ")";
            tooltip.style.left = (event.pageX + 10) + "px";
            tooltip.style.top = (event.pageY - 28) + "px";
            tooltip.style.display = "block";
        }});
        cell.addEventListener("mouseout", function() {{
            tooltip.style.display = "none";
        }});
    }});
}})();
"#,
        max_label = js_string(&Mode::Max.label()),
        min_label = js_string(&Mode::Min.label()),
        initial = initial.as_str(),
    )
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
