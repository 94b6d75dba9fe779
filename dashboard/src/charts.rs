pub mod svg;

use crate::content::ContentEngagementRecord;
use crate::traffic::{DailyBucket, HourlyBucket};

/// One x-axis position carrying a current and a previous-period value.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPoint {
    pub label: String,
    pub current: f64,
    pub previous: f64,
}

pub fn daily_points(buckets: &[DailyBucket]) -> Vec<ComparisonPoint> {
    buckets
        .iter()
        .map(|b| ComparisonPoint {
            label: b.day.to_owned(),
            current: b.current as f64,
            previous: b.previous as f64,
        })
        .collect()
}

pub fn hourly_points(buckets: &[HourlyBucket]) -> Vec<ComparisonPoint> {
    buckets
        .iter()
        .map(|b| ComparisonPoint {
            label: b.hour.clone(),
            current: b.current as f64,
            previous: b.previous as f64,
        })
        .collect()
}

/// `(name, views)` pairs in catalogue order.
pub fn content_views(records: &[ContentEngagementRecord]) -> Vec<(String, f64)> {
    records
        .iter()
        .map(|r| (r.content_name.clone(), f64::from(r.views)))
        .collect()
}

/// Largest value across both series, never below 1 so it can scale bars.
pub fn comparison_max(points: &[ComparisonPoint]) -> f64 {
    let max = points
        .iter()
        .flat_map(|p| [p.current, p.previous])
        .fold(0.0_f64, f64::max);
    if max == 0.0 { 1.0 } else { max }
}
