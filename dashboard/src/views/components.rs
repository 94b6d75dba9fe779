use maud::{Markup, html};

use crate::content::{PromotionRecord, revenue_share};
use crate::heatmap::{self, HeatmapRow, Intensity, WEEKDAYS, day_name};
use crate::styles::{Charts, Heatmap};
use crate::summary::DashboardMetrics;

/// Groups digits in threes: `12345` -> `"12,345"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(rate: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, rate * 100.0)
}

/// `11060` -> `"$11.1k"`.
pub fn format_thousands(amount: u64) -> String {
    format!("${:.1}k", amount as f64 / 1000.0)
}

pub fn format_currency(amount: u64) -> String {
    format!("${}", format_count(amount))
}

pub fn trend_line(trend: f64, label: &str) -> Markup {
    html! {
        @if trend > 0.0 {
            span.(Charts::TREND_UP) { "↑ +" (format!("{trend:.1}")) "% " (label) }
        } @else if trend < 0.0 {
            span.(Charts::TREND_DOWN) { "↓ " (format!("{trend:.1}")) "% " (label) }
        } @else {
            span.(Charts::TREND_FLAT) { "0.0% " (label) }
        }
    }
}

fn metric_card(label: &str, value: &str, trend: Option<f64>) -> Markup {
    html! {
        div.(Charts::CARD) {
            p.(Charts::METRIC_LABEL) { (label) }
            p.(Charts::METRIC_VALUE) { (value) }
            @if let Some(trend) = trend {
                (trend_line(trend, "vs last week"))
            }
        }
    }
}

pub fn top_metrics(metrics: &DashboardMetrics) -> Markup {
    html! {
        div.(Charts::GRID_FOUR) {
            (metric_card("Total Traffic", &format_count(metrics.total_traffic), Some(metrics.traffic_trend())))
            (metric_card("Avg Engagement Rate", &format_percent(metrics.avg_engagement_rate, 1), None))
            (metric_card("Avg Dwell Time", &format!("{:.1} min", metrics.avg_dwell_time), None))
            (metric_card("Promotion Revenue", &format_thousands(metrics.total_revenue), Some(metrics.revenue_trend())))
        }
    }
}

pub fn insight(positive: bool, heading: &str, body: &str) -> Markup {
    html! {
        div.(if positive { Charts::INSIGHT_GOOD } else { Charts::INSIGHT_INFO }) {
            h4 { (heading) }
            p { (body) }
        }
    }
}

pub fn stat(value: &str, label: &str) -> Markup {
    html! {
        div.(Charts::STAT) {
            p.(Charts::STAT_VALUE) { (value) }
            p.(Charts::METRIC_LABEL) { (label) }
        }
    }
}

pub fn chart_card(chart: Markup) -> Markup {
    html! {
        div.(Charts::CHART_CONTAINER) { (chart) }
    }
}

fn intensity_class(level: Intensity) -> &'static str {
    match level {
        Intensity::Minimal => Heatmap::LEVEL_MINIMAL,
        Intensity::Low => Heatmap::LEVEL_LOW,
        Intensity::Medium => Heatmap::LEVEL_MEDIUM,
        Intensity::High => Heatmap::LEVEL_HIGH,
        Intensity::Peak => Heatmap::LEVEL_PEAK,
    }
}

pub fn heatmap_grid(rows: &[HeatmapRow]) -> Markup {
    let peak = heatmap::max_value(rows);

    html! {
        div.(Charts::CARD) {
            h3 { "Traffic Heatmap: Day vs Hour" }
            table.(Heatmap::HEATMAP) {
                thead {
                    tr {
                        th {}
                        @for day in WEEKDAYS {
                            th.(Heatmap::HEATMAP_LABEL) { (&day_name(day)[..3]) }
                        }
                    }
                }
                tbody {
                    @for row in rows {
                        tr {
                            td.(Heatmap::HEATMAP_LABEL) { (row.hour) }
                            @for day in WEEKDAYS {
                                @let value = row.value(day);
                                td.(Heatmap::HEATMAP_CELL).(intensity_class(Intensity::for_value(value)))
                                    title=(format!("{} {}: {value} customers", day_name(day), row.hour))
                                { (value) }
                            }
                        }
                    }
                }
            }
            div.(Heatmap::HEATMAP_LEGEND) {
                span { "Low traffic" }
                @for level in Intensity::all() {
                    span.(Heatmap::LEGEND_SWATCH).(intensity_class(level)) {}
                }
                span { "High traffic (peak " (peak) ")" }
            }
        }
    }
}

pub fn promotion_table(promotions: &[PromotionRecord]) -> Markup {
    html! {
        div.(Charts::CARD) {
            h3 { "Top Promotions" }
            table.(Charts::DATA_TABLE) {
                thead {
                    tr {
                        th { "Promotion" }
                        th { "Views" }
                        th { "Avg View" }
                        th { "Engagement" }
                        th { "Conversion" }
                        th { "Revenue" }
                    }
                }
                tbody {
                    @for p in promotions {
                        tr {
                            td { (p.name) }
                            td { (p.views) }
                            td { (format!("{:.1}s", p.avg_view_time)) }
                            td { (format_percent(p.engagement_rate, 0)) }
                            td { (format_percent(p.conversion_rate, 0)) }
                            td { (format_currency(p.revenue)) }
                        }
                    }
                }
            }
        }
    }
}

/// Revenue per promotion as bars relative to the top earner.
pub fn sales_impact(promotions: &[PromotionRecord]) -> Markup {
    html! {
        div.(Charts::CARD) {
            h3 { "Sales Impact Analysis" }
            @for p in promotions {
                div.(Charts::LIST_ROW) {
                    span { (p.name) }
                    strong { (format_currency(p.revenue)) }
                }
                div.(Charts::PROGRESS_TRACK) {
                    div.(Charts::PROGRESS_BAR)
                        style=(format!("width: {:.1}%", revenue_share(p, promotions) * 100.0)) {}
                }
            }
        }
    }
}
