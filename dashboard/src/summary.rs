use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::{AVG_DWELL_TIME_MINUTES, PREVIOUS_REVENUE_PERCENT};
use crate::content::{ContentEngagementRecord, PromotionRecord};
use crate::traffic::{self, DailyBucket, HourlyBucket, VisitSample};

/// Top-line figures shown in the metric cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_traffic: u64,
    pub avg_engagement_rate: f64,
    /// Minutes; a fixed placeholder.
    pub avg_dwell_time: f64,
    pub total_revenue: u64,
    pub previous_period_traffic: u64,
    /// Derived from `total_revenue`, not measured.
    pub previous_period_revenue: u64,
}

impl DashboardMetrics {
    pub fn traffic_trend(&self) -> f64 {
        trend_percent(
            self.total_traffic as f64,
            self.previous_period_traffic as f64,
        )
    }

    pub fn revenue_trend(&self) -> f64 {
        trend_percent(
            self.total_revenue as f64,
            self.previous_period_revenue as f64,
        )
    }
}

/// Percentage change from `previous` to `current`; 0 when there is no baseline.
pub fn trend_percent(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

pub fn calculate_metrics(
    samples: &[VisitSample],
    engagement: &[ContentEngagementRecord],
    promotions: &[PromotionRecord],
    now: NaiveDateTime,
) -> DashboardMetrics {
    let (total_traffic, previous_period_traffic) = traffic::period_totals(samples, now);

    let avg_engagement_rate = if engagement.is_empty() {
        0.0
    } else {
        engagement.iter().map(|r| r.engagement_rate).sum::<f64>() / engagement.len() as f64
    };

    let total_revenue: u64 = promotions.iter().map(|p| p.revenue).sum();
    // Integer arithmetic keeps the floor exact.
    let previous_period_revenue = total_revenue * PREVIOUS_REVENUE_PERCENT / 100;

    DashboardMetrics {
        total_traffic,
        avg_engagement_rate,
        avg_dwell_time: AVG_DWELL_TIME_MINUTES,
        total_revenue,
        previous_period_traffic,
        previous_period_revenue,
    }
}

/// Hours with the highest current-period average, busiest first.
pub fn busiest_hours(hourly: &[HourlyBucket], count: usize) -> Vec<&HourlyBucket> {
    let mut ranked: Vec<&HourlyBucket> = hourly.iter().collect();
    ranked.sort_by(|a, b| b.current.cmp(&a.current).then_with(|| a.hour.cmp(&b.hour)));
    ranked.truncate(count);
    ranked
}

/// Hours with the lowest current-period average, quietest first.
pub fn quietest_hours(hourly: &[HourlyBucket], count: usize) -> Vec<&HourlyBucket> {
    let mut ranked: Vec<&HourlyBucket> = hourly.iter().collect();
    ranked.sort_by(|a, b| a.current.cmp(&b.current).then_with(|| a.hour.cmp(&b.hour)));
    ranked.truncate(count);
    ranked
}

/// Busiest days with their percentage above the daily mean.
pub fn busiest_days(daily: &[DailyBucket], count: usize) -> Vec<(&'static str, f64)> {
    if daily.is_empty() {
        return Vec::new();
    }
    let mean = daily.iter().map(|d| d.current as f64).sum::<f64>() / daily.len() as f64;
    let mut ranked: Vec<&DailyBucket> = daily.iter().collect();
    ranked.sort_by(|a, b| b.current.cmp(&a.current));
    ranked
        .into_iter()
        .take(count)
        .map(|d| (d.day, trend_percent(d.current as f64, mean)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{generate_content_engagement, top_promotions};
    use crate::traffic::generate_traffic;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn trend_is_relative_change() {
        assert_eq!(trend_percent(1000.0, 800.0), 25.0);
        assert_eq!(trend_percent(800.0, 1000.0), -20.0);
    }

    #[test]
    fn trend_without_baseline_is_zero() {
        assert_eq!(trend_percent(1000.0, 0.0), 0.0);
        assert_eq!(trend_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn revenue_and_placeholders() {
        let metrics = calculate_metrics(&[], &[], &top_promotions(), now());
        assert_eq!(metrics.total_revenue, 11060);
        assert_eq!(metrics.previous_period_revenue, 9401);
        assert_eq!(metrics.avg_dwell_time, 12.5);
        assert_eq!(metrics.avg_engagement_rate, 0.0);
        assert_eq!(metrics.total_traffic, 0);
        assert_eq!(metrics.traffic_trend(), 0.0);
    }

    #[test]
    fn metrics_from_generated_snapshot() {
        let mut rng = StdRng::seed_from_u64(11);
        let today = now().date();
        let samples = generate_traffic(&mut rng, today);
        let engagement = generate_content_engagement(&mut rng, today);
        let metrics = calculate_metrics(&samples, &engagement, &top_promotions(), now());

        assert!((0.4..0.8).contains(&metrics.avg_engagement_rate));
        let mean = engagement.iter().map(|r| r.engagement_rate).sum::<f64>() / 5.0;
        assert!((metrics.avg_engagement_rate - mean).abs() < 1e-12);

        let (current, previous) = traffic::period_totals(&samples, now());
        assert_eq!(metrics.total_traffic, current);
        assert_eq!(metrics.previous_period_traffic, previous);
        assert!(metrics.total_traffic > 0 && metrics.previous_period_traffic > 0);
    }

    #[test]
    fn revenue_trend_uses_derived_previous() {
        let metrics = calculate_metrics(&[], &[], &top_promotions(), now());
        let expected = (11060.0 - 9401.0) / 9401.0 * 100.0;
        assert!((metrics.revenue_trend() - expected).abs() < 1e-9);
    }

    fn hour(label: &str, current: u64) -> HourlyBucket {
        HourlyBucket {
            hour: label.to_owned(),
            current,
            previous: 0,
        }
    }

    #[test]
    fn hour_rankings_break_ties_by_time() {
        let hourly = vec![
            hour("09:00", 20),
            hour("12:00", 50),
            hour("15:00", 20),
            hour("18:00", 50),
        ];
        let busy: Vec<&str> = busiest_hours(&hourly, 2).iter().map(|b| b.hour.as_str()).collect();
        assert_eq!(busy, ["12:00", "18:00"]);
        let quiet: Vec<&str> = quietest_hours(&hourly, 2).iter().map(|b| b.hour.as_str()).collect();
        assert_eq!(quiet, ["09:00", "15:00"]);
        assert!(busiest_hours(&[], 2).is_empty());
    }

    #[test]
    fn busiest_days_relative_to_mean() {
        let daily = vec![
            DailyBucket {
                day: "Mon",
                current: 100,
                previous: 0,
            },
            DailyBucket {
                day: "Tue",
                current: 150,
                previous: 0,
            },
            DailyBucket {
                day: "Wed",
                current: 50,
                previous: 0,
            },
        ];
        let busiest = busiest_days(&daily, 1);
        assert_eq!(busiest, vec![("Tue", 50.0)]);
        assert!(busiest_days(&[], 2).is_empty());
    }
}
