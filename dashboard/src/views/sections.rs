use maud::{Markup, html};

use crate::charts::{self, svg};
use crate::content::{self, PromotionRecord};
use crate::session::Snapshot;
use crate::styles::Charts;
use crate::summary::{self, DashboardMetrics};
use crate::traffic::{DailyBucket, HourlyBucket};

use super::components::{
    chart_card, format_count, format_currency, format_percent, format_thousands, heatmap_grid, insight,
    promotion_table, sales_impact, stat, top_metrics, trend_line,
};

fn hour_list(hours: &[&HourlyBucket]) -> String {
    hours
        .iter()
        .map(|b| b.hour.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn traffic_charts(daily: &[DailyBucket], hourly: &[HourlyBucket], daily_title: &str) -> Markup {
    html! {
        div.(Charts::GRID_TWO) {
            (chart_card(svg::render_comparison_bar_chart(&charts::daily_points(daily), daily_title)))
            (chart_card(svg::render_comparison_line_chart(&charts::hourly_points(hourly), "Hourly Traffic (daily average)")))
        }
    }
}

fn traffic_insights(
    metrics: &DashboardMetrics,
    hourly: &[HourlyBucket],
    promotions: &[PromotionRecord],
) -> Markup {
    let trend = metrics.traffic_trend();
    let direction = if trend >= 0.0 { "up" } else { "down" };
    let peaks = hour_list(&summary::busiest_hours(hourly, 2));

    html! {
        div.(Charts::GRID_TWO) {
            (insight(
                trend >= 0.0,
                "Week over Week",
                &format!("Traffic {direction} {:.1}% this week. Your busiest hours are {peaks}.", trend.abs()),
            ))
            (insight(
                false,
                "Recommendation",
                &format!(
                    "Consider increasing staff around {peaks}. Promotions average {} conversion.",
                    format_percent(content::average_conversion_rate(promotions), 0),
                ),
            ))
        }
    }
}

pub fn overview(snapshot: &Snapshot) -> Markup {
    let metrics = snapshot.metrics();
    let hourly = snapshot.hourly();
    let daily = snapshot.daily();

    html! {
        div.(Charts::STACK) {
            (top_metrics(&metrics))
            (traffic_insights(&metrics, &hourly, &snapshot.promotions))
            (traffic_charts(&daily, &hourly, "Daily Traffic Comparison"))
            (heatmap_grid(&snapshot.heatmap))
            div.(Charts::GRID_TWO) {
                (chart_card(svg::render_horizontal_bar_chart(
                    &charts::content_views(&snapshot.content_engagement),
                    "Content Views",
                )))
                (promotion_table(&snapshot.promotions))
            }
        }
    }
}

pub fn traffic(snapshot: &Snapshot) -> Markup {
    let metrics = snapshot.metrics();
    let hourly = snapshot.hourly();
    let daily = snapshot.daily();
    let busiest_days = summary::busiest_days(&daily, 2);

    html! {
        div.(Charts::STACK) {
            (top_metrics(&metrics))
            (traffic_charts(&daily, &hourly, "Weekly Traffic Trends"))
            (heatmap_grid(&snapshot.heatmap))
            div.(Charts::CARD) {
                h3 { "Traffic Analysis Details" }
                p { strong { "Peak Hours: " } (hour_list(&summary::busiest_hours(&hourly, 2))) }
                p { strong { "Slowest Hours: " } (hour_list(&summary::quietest_hours(&hourly, 2))) }
                p {
                    strong { "Busiest Days: " }
                    @for (i, (day, above)) in busiest_days.iter().enumerate() {
                        @if i > 0 { ", " }
                        (day) " (" (format!("{above:+.0}")) "% vs average)"
                    }
                }
                p { strong { "Average Dwell Time: " } (format!("{:.1} minutes", metrics.avg_dwell_time)) }
                p { strong { "Week-over-Week Growth: " } (format!("{:+.1}%", metrics.traffic_trend())) }
            }
        }
    }
}

pub fn engagement(snapshot: &Snapshot) -> Markup {
    let metrics = snapshot.metrics();
    let records = &snapshot.content_engagement;

    html! {
        div.(Charts::STACK) {
            div.(Charts::CARD) {
                h3 { "Engagement Metrics" }
                div.(Charts::GRID_FOUR) {
                    (stat(&format_percent(metrics.avg_engagement_rate, 1), "Average Engagement Rate"))
                    (stat(&format_count(content::total_views(records)), "Total Content Views"))
                    (stat(&snapshot.promotions.len().to_string(), "Active Promotions"))
                }
            }
            (chart_card(svg::render_horizontal_bar_chart(&charts::content_views(records), "Content Views")))
            div.(Charts::GRID_TWO) {
                div.(Charts::CARD) {
                    h3 { "Content Performance" }
                    @for record in content::ranked_by_views(records) {
                        div.(Charts::LIST_ROW) {
                            div {
                                div { (record.content_name) }
                                div.(Charts::LIST_META) {
                                    (record.views) " views • " (format!("{:.1}", record.avg_view_time)) "s avg"
                                }
                            }
                            strong { (format_percent(record.engagement_rate, 0)) }
                        }
                    }
                }
                div.(Charts::CARD) {
                    h3 { "Engagement Insights" }
                    @if let Some(best) = content::most_engaging(records) {
                        p {
                            strong { "Most Engaging: " }
                            (best.content_name) " - " (format_percent(best.engagement_rate, 0)) " engagement rate"
                        }
                    }
                    @if let Some(longest) = content::longest_viewed(records) {
                        p {
                            strong { "Longest View Time: " }
                            (longest.content_name) " - " (format!("{:.1}", longest.avg_view_time)) " seconds"
                        }
                    }
                    p { strong { "Recommendation: " } "Rotate content every 7-10 days to maintain engagement." }
                }
            }
        }
    }
}

fn revenue_card(metrics: &DashboardMetrics) -> Markup {
    html! {
        div.(Charts::CARD) {
            p.(Charts::METRIC_LABEL) { "Total Promotion Revenue" }
            p.(Charts::METRIC_VALUE) { (format_thousands(metrics.total_revenue)) }
            (trend_line(metrics.revenue_trend(), "vs last period"))
            p.(Charts::LIST_META) { "Previous period: " (format_currency(metrics.previous_period_revenue)) }
        }
    }
}

pub fn promotions(snapshot: &Snapshot) -> Markup {
    let metrics = snapshot.metrics();
    let promotions = &snapshot.promotions;
    let avg_conversion = content::average_conversion_rate(promotions);

    html! {
        div.(Charts::STACK) {
            div.(Charts::GRID_TWO) {
                (revenue_card(&metrics))
                div.(Charts::CARD) {
                    p.(Charts::METRIC_LABEL) { "Avg Conversion Rate" }
                    p.(Charts::METRIC_VALUE) { (format_percent(avg_conversion, 1)) }
                }
            }
            (promotion_table(promotions))
            div.(Charts::GRID_TWO) {
                (sales_impact(promotions))
                div.(Charts::CARD) {
                    h3 { "Promotion ROI" }
                    @if let Some(best) = content::best_by_revenue(promotions) {
                        p { strong { "Best Performer: " } (best.name) }
                        p.(Charts::LIST_META) {
                            (best.views) " views | " (format_percent(best.conversion_rate, 0))
                            " conversion | " (format_currency(best.revenue)) " revenue"
                        }
                    }
                    @if let Some(efficient) = content::best_by_conversion(promotions) {
                        p { strong { "Most Efficient: " } (efficient.name) }
                        p.(Charts::LIST_META) {
                            (efficient.views) " views | " (format_percent(efficient.conversion_rate, 0)) " conversion"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snapshot() -> Snapshot {
        let now = NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        Snapshot::generate(&mut StdRng::seed_from_u64(11), now)
    }

    #[test]
    fn overview_shows_cards_and_charts() {
        let html = overview(&snapshot()).into_string();
        assert!(html.contains("Total Traffic"));
        assert!(html.contains("Week over Week"));
        assert!(html.contains("Daily Traffic Comparison"));
        assert!(html.contains("Top Promotions"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn traffic_lists_peak_and_slow_hours() {
        let html = traffic(&snapshot()).into_string();
        assert!(html.contains("Traffic Analysis Details"));
        assert!(html.contains("Peak Hours: "));
        assert!(html.contains("Slowest Hours: "));
        assert!(html.contains("12.5 minutes"));
    }

    #[test]
    fn engagement_ranks_content() {
        let snap = snapshot();
        let html = engagement(&snap).into_string();
        assert!(html.contains("Content Performance"));
        let top = content::ranked_by_views(&snap.content_engagement)[0];
        assert!(html.contains(&top.content_name));
    }

    #[test]
    fn revenue_card_follows_trend_sign() {
        let mut metrics = snapshot().metrics();
        let rising = revenue_card(&metrics).into_string();
        assert!(rising.contains(Charts::TREND_UP));

        metrics.previous_period_revenue = metrics.total_revenue * 2;
        let falling = revenue_card(&metrics).into_string();
        assert!(falling.contains(Charts::TREND_DOWN));
        assert!(!falling.contains(Charts::TREND_UP));
        assert!(falling.contains("-50.0% vs last period"));
    }

    #[test]
    fn promotions_names_best_performers() {
        let html = promotions(&snapshot()).into_string();
        assert!(html.contains("$11.1k"));
        assert!(html.contains("$9,401"));
        assert!(html.contains("Best Performer: </strong>BBQ Burger Special"));
    }
}
