//! Content-engagement and promotion records, plus the rollups the engagement
//! and promotion sections display.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

/// Promotional content shown on in-store screens: `(id, name)`.
const CONTENT_CATALOGUE: &[(&str, &str)] = &[
    ("burger-01", "BBQ Burger Special"),
    ("pizza-01", "Signature Pizza Promotion"),
    ("dessert-01", "Dessert Combo Deal"),
    ("drink-01", "Summer Beverage Collection"),
    ("salad-01", "Healthy Salad Bowl"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEngagementRecord {
    pub content_id: String,
    pub content_name: String,
    pub views: u32,
    /// Seconds.
    pub avg_view_time: f64,
    pub engagement_rate: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionRecord {
    pub id: String,
    pub name: String,
    pub views: u32,
    pub avg_view_time: f64,
    pub engagement_rate: f64,
    pub conversion_rate: f64,
    pub revenue: u64,
}

pub fn generate_content_engagement<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
) -> Vec<ContentEngagementRecord> {
    CONTENT_CATALOGUE
        .iter()
        .map(|&(id, name)| ContentEngagementRecord {
            content_id: id.to_owned(),
            content_name: name.to_owned(),
            views: rng.gen_range(200..700),
            avg_view_time: rng.gen_range(5.0..15.0),
            engagement_rate: rng.gen_range(0.4..0.8),
            date: today,
        })
        .collect()
}

/// The fixed promotion catalogue with its sales figures.
pub fn top_promotions() -> Vec<PromotionRecord> {
    [
        ("1", "BBQ Burger Special", 542, 8.5, 0.67, 0.28, 3420),
        ("2", "Signature Pizza Promotion", 483, 7.2, 0.62, 0.25, 2850),
        ("3", "Dessert Combo Deal", 421, 6.8, 0.58, 0.32, 2340),
        ("4", "Summer Beverage Collection", 356, 5.4, 0.51, 0.22, 1560),
        ("5", "Healthy Salad Bowl", 298, 6.1, 0.48, 0.19, 890),
    ]
    .into_iter()
    .map(
        |(id, name, views, avg_view_time, engagement_rate, conversion_rate, revenue)| {
            PromotionRecord {
                id: id.to_owned(),
                name: name.to_owned(),
                views,
                avg_view_time,
                engagement_rate,
                conversion_rate,
                revenue,
            }
        },
    )
    .collect()
}

pub fn total_views(records: &[ContentEngagementRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.views)).sum()
}

pub fn ranked_by_views(records: &[ContentEngagementRecord]) -> Vec<&ContentEngagementRecord> {
    let mut ranked: Vec<&ContentEngagementRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked
}

pub fn average_conversion_rate(promotions: &[PromotionRecord]) -> f64 {
    if promotions.is_empty() {
        return 0.0;
    }
    promotions.iter().map(|p| p.conversion_rate).sum::<f64>() / promotions.len() as f64
}

/// Revenue of `promotion` relative to the best earner, in `[0, 1]`.
pub fn revenue_share(promotion: &PromotionRecord, promotions: &[PromotionRecord]) -> f64 {
    let top = promotions.iter().map(|p| p.revenue).max().unwrap_or(0);
    if top == 0 {
        0.0
    } else {
        promotion.revenue as f64 / top as f64
    }
}

pub fn most_engaging(records: &[ContentEngagementRecord]) -> Option<&ContentEngagementRecord> {
    records
        .iter()
        .max_by(|a, b| a.engagement_rate.total_cmp(&b.engagement_rate))
}

pub fn longest_viewed(records: &[ContentEngagementRecord]) -> Option<&ContentEngagementRecord> {
    records
        .iter()
        .max_by(|a, b| a.avg_view_time.total_cmp(&b.avg_view_time))
}

pub fn best_by_revenue(promotions: &[PromotionRecord]) -> Option<&PromotionRecord> {
    promotions.iter().max_by_key(|p| p.revenue)
}

pub fn best_by_conversion(promotions: &[PromotionRecord]) -> Option<&PromotionRecord> {
    promotions
        .iter()
        .max_by(|a, b| a.conversion_rate.total_cmp(&b.conversion_rate))
}
