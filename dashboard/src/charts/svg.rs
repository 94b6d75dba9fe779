use maud::{Markup, html};

use super::{ComparisonPoint, comparison_max};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 240.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 30.0;

const TEXT_STYLE: &str = "fill: var(--foreground); font-family: inherit";
const SVG_CONTAINER_STYLE: &str = "width:100%;height:auto";
const CURRENT_FILL: &str = "var(--accent)";
const PREVIOUS_FILL: &str = "var(--muted)";

pub fn format_value(v: f64) -> String {
    if v == v.floor() && v.abs() < 1_000_000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn legend(y: f64) -> Markup {
    let x = WIDTH - MARGIN_RIGHT - 170.0;
    html! {
        rect x=(x) y=(y - 9.0) width="10" height="10" style=(format!("fill: {CURRENT_FILL}")) {}
        text x=(x + 14.0) y=(y) font-size="11" style=(TEXT_STYLE) { "This week" }
        rect x=(x + 85.0) y=(y - 9.0) width="10" height="10" style=(format!("fill: {PREVIOUS_FILL}")) {}
        text x=(x + 99.0) y=(y) font-size="11" style=(TEXT_STYLE) { "Last week" }
    }
}

fn y_axis(max_val: f64, chart_h: f64) -> Markup {
    html! {
        text x=(MARGIN_LEFT - 5.0) y=(MARGIN_TOP + 10.0) font-size="10" text-anchor="end" style=(TEXT_STYLE) {
            (format_value(max_val))
        }
        text x=(MARGIN_LEFT - 5.0) y=(MARGIN_TOP + chart_h) font-size="10" text-anchor="end" style=(TEXT_STYLE) { "0" }
    }
}

/// Side-by-side bars per label: current period then previous period.
pub fn render_comparison_bar_chart(points: &[ComparisonPoint], label: &str) -> Markup {
    if points.is_empty() {
        return empty_chart(label);
    }

    let max_val = comparison_max(points);
    let chart_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let group_w = chart_w / points.len() as f64;
    let bar_w = ((group_w - 6.0) / 2.0).max(0.5);
    let label_y = HEIGHT - 10.0;

    html! {
        svg viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) xmlns="http://www.w3.org/2000/svg" style=(SVG_CONTAINER_STYLE) {
            rect width=(WIDTH) height=(HEIGHT) style="fill: var(--background)" {}
            text x=(MARGIN_LEFT) y="14" font-size="12" style=(TEXT_STYLE) { (label) }
            (legend(14.0))
            (y_axis(max_val, chart_h))
            @for (i, point) in points.iter().enumerate() {
                @let group_x = MARGIN_LEFT + i as f64 * group_w + 3.0;
                @let current_h = (point.current / max_val) * chart_h;
                @let previous_h = (point.previous / max_val) * chart_h;
                rect x=(group_x) y=(MARGIN_TOP + chart_h - current_h) width=(bar_w) height=(current_h)
                    style=(format!("fill: {CURRENT_FILL}")) {
                    title { (point.label) " this week: " (format_value(point.current)) }
                }
                rect x=(group_x + bar_w) y=(MARGIN_TOP + chart_h - previous_h) width=(bar_w) height=(previous_h)
                    style=(format!("fill: {PREVIOUS_FILL}")) {
                    title { (point.label) " last week: " (format_value(point.previous)) }
                }
                text x=(group_x + bar_w) y=(label_y) font-size="11" text-anchor="middle" style=(TEXT_STYLE) {
                    (point.label)
                }
            }
        }
    }
}

fn polyline_points(values: impl Iterator<Item = f64>, count: usize, max_val: f64) -> String {
    use std::fmt::Write;

    let chart_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let mut points = String::new();
    for (i, val) in values.enumerate() {
        let x = MARGIN_LEFT + (i as f64 / (count - 1).max(1) as f64) * chart_w;
        let y = MARGIN_TOP + chart_h - (val / max_val) * chart_h;
        if !points.is_empty() {
            points.push(' ');
        }
        let _ = write!(points, "{x},{y}");
    }
    points
}

/// Two lines sharing a zero-based y axis: solid current, dashed previous.
pub fn render_comparison_line_chart(points: &[ComparisonPoint], label: &str) -> Markup {
    if points.is_empty() {
        return empty_chart(label);
    }

    let max_val = comparison_max(points);
    let chart_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let current = polyline_points(points.iter().map(|p| p.current), points.len(), max_val);
    let previous = polyline_points(points.iter().map(|p| p.previous), points.len(), max_val);
    let label_y = HEIGHT - 10.0;

    html! {
        svg viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) xmlns="http://www.w3.org/2000/svg" style=(SVG_CONTAINER_STYLE) {
            rect width=(WIDTH) height=(HEIGHT) style="fill: var(--background)" {}
            text x=(MARGIN_LEFT) y="14" font-size="12" style=(TEXT_STYLE) { (label) }
            (legend(14.0))
            (y_axis(max_val, chart_h))
            polyline points=(previous) fill="none" stroke-width="2" stroke-dasharray="4 3" style=(format!("stroke: {PREVIOUS_FILL}")) {}
            polyline points=(current) fill="none" stroke-width="2" style=(format!("stroke: {CURRENT_FILL}")) {}
            @for (i, point) in points.iter().enumerate() {
                @let x = MARGIN_LEFT + (i as f64 / (points.len() - 1).max(1) as f64) * chart_w;
                @let y = MARGIN_TOP + chart_h - (point.current / max_val) * chart_h;
                circle cx=(x) cy=(y) r="3" style=(format!("fill: {CURRENT_FILL}")) {
                    title { (point.label) ": " (format_value(point.current)) " (last week " (format_value(point.previous)) ")" }
                }
                // Every other label keeps 14 hours legible.
                @if i % 2 == 0 || i == points.len() - 1 {
                    text x=(x) y=(label_y) font-size="10" text-anchor="middle" style=(TEXT_STYLE) {
                        (point.label)
                    }
                }
            }
        }
    }
}

/// Horizontal bars, one row per item, scaled to the largest value.
pub fn render_horizontal_bar_chart(items: &[(String, f64)], label: &str) -> Markup {
    if items.is_empty() {
        return empty_chart(label);
    }

    const ROW_H: f64 = 28.0;
    const NAME_W: f64 = 190.0;
    let total_h = MARGIN_TOP + ROW_H * items.len() as f64 + 10.0;
    let bar_area = WIDTH - NAME_W - MARGIN_RIGHT - 50.0;
    let max_val = items.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let max_val = if max_val == 0.0 { 1.0 } else { max_val };

    html! {
        svg viewBox=(format!("0 0 {WIDTH} {total_h}")) xmlns="http://www.w3.org/2000/svg" style=(SVG_CONTAINER_STYLE) {
            rect width=(WIDTH) height=(total_h) style="fill: var(--background)" {}
            text x="10" y="14" font-size="12" style=(TEXT_STYLE) { (label) }
            @for (i, (name, val)) in items.iter().enumerate() {
                @let y = MARGIN_TOP + i as f64 * ROW_H;
                @let bar_w = (val / max_val) * bar_area;
                text x=(NAME_W - 8.0) y=(y + ROW_H / 2.0 + 4.0) font-size="11" text-anchor="end" style=(TEXT_STYLE) {
                    (name)
                }
                rect x=(NAME_W) y=(y + 4.0) width=(bar_w.max(0.5)) height=(ROW_H - 8.0) opacity="0.85"
                    style=(format!("fill: {CURRENT_FILL}")) {
                    title { (name) ": " (format_value(*val)) }
                }
                text x=(NAME_W + bar_w + 6.0) y=(y + ROW_H / 2.0 + 4.0) font-size="11" style=(TEXT_STYLE) {
                    (format_value(*val))
                }
            }
        }
    }
}

fn empty_chart(label: &str) -> Markup {
    html! {
        svg viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) xmlns="http://www.w3.org/2000/svg" style=(SVG_CONTAINER_STYLE) {
            rect width=(WIDTH) height=(HEIGHT) style="fill: var(--background)" {}
            text x=(WIDTH / 2.0) y=(HEIGHT / 2.0) font-size="14" text-anchor="middle" style=(TEXT_STYLE) {
                (label) ": no data"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, current: f64, previous: f64) -> ComparisonPoint {
        ComparisonPoint {
            label: label.to_owned(),
            current,
            previous,
        }
    }

    #[test]
    fn empty_input_renders_placeholder() {
        let markup = render_comparison_bar_chart(&[], "Daily Traffic").into_string();
        assert!(markup.contains("Daily Traffic: no data"));
        let markup = render_horizontal_bar_chart(&[], "Views").into_string();
        assert!(markup.contains("Views: no data"));
    }

    #[test]
    fn bar_chart_draws_two_bars_per_point() {
        let points = vec![point("Mon", 100.0, 50.0), point("Tue", 80.0, 0.0)];
        let markup = render_comparison_bar_chart(&points, "Daily").into_string();
        // Background, two legend swatches, then two bars per point.
        assert_eq!(markup.matches("<rect").count(), 1 + 2 + 4);
        assert!(markup.contains("Mon this week: 100"));
        assert!(markup.contains("Tue last week: 0"));
    }

    #[test]
    fn line_chart_has_both_series() {
        let points = vec![point("09:00", 10.0, 8.0), point("10:00", 12.0, 9.0)];
        let markup = render_comparison_line_chart(&points, "Hourly").into_string();
        assert_eq!(markup.matches("<polyline").count(), 2);
        assert!(markup.contains("09:00: 10 (last week 8)"));
    }

    #[test]
    fn single_point_line_does_not_divide_by_zero() {
        let markup = render_comparison_line_chart(&[point("09:00", 5.0, 5.0)], "Hourly")
            .into_string();
        assert!(!markup.contains("NaN"));
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(7.26), "7.3");
    }
}
