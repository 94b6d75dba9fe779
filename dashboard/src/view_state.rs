//! UI state carried in the query string: which section is shown, the selected
//! date range, and the toolbar filters. Display state only; none of it
//! re-slices the generated data.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Overview,
    Traffic,
    Engagement,
    Promotions,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Traffic,
        Section::Engagement,
        Section::Promotions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Traffic => "traffic",
            Section::Engagement => "engagement",
            Section::Promotions => "promotions",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Traffic => "Traffic Analytics",
            Section::Engagement => "Content Engagement",
            Section::Promotions => "Top Promotions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Dashboard Overview",
            Section::Traffic => "Traffic Analytics",
            Section::Engagement => "Content Engagement",
            Section::Promotions => "Promotion Performance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DateRangePreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[default]
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "custom")]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeValue {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: &'static str,
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 5] = [
        DateRangePreset::Today,
        DateRangePreset::Yesterday,
        DateRangePreset::Last7Days,
        DateRangePreset::Last30Days,
        DateRangePreset::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateRangePreset::Today => "today",
            DateRangePreset::Yesterday => "yesterday",
            DateRangePreset::Last7Days => "7days",
            DateRangePreset::Last30Days => "30days",
            DateRangePreset::Custom => "custom",
        }
    }

    /// Short label for the selector button.
    pub fn menu_label(&self) -> &'static str {
        match self {
            DateRangePreset::Custom => "Custom",
            other => other.range_label(),
        }
    }

    fn range_label(&self) -> &'static str {
        match self {
            DateRangePreset::Today => "Today",
            DateRangePreset::Yesterday => "Yesterday",
            DateRangePreset::Last7Days => "Last 7 Days",
            DateRangePreset::Last30Days => "Last 30 Days",
            DateRangePreset::Custom => "Custom Range",
        }
    }

    /// Whole-day bounds for the preset, relative to `now`.
    ///
    /// A custom range has no picker yet and resolves like the last 30 days.
    pub fn resolve(&self, now: NaiveDateTime) -> DateRangeValue {
        let today = now.date();
        let (first, last) = match self {
            DateRangePreset::Today => (today, today),
            DateRangePreset::Yesterday => {
                let yesterday = days_before(today, 1);
                (yesterday, yesterday)
            }
            DateRangePreset::Last7Days => (days_before(today, 6), today),
            DateRangePreset::Last30Days | DateRangePreset::Custom => {
                (days_before(today, 29), today)
            }
        };
        DateRangeValue {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1),
            label: self.range_label(),
        }
    }
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationFilter {
    #[default]
    All,
    MainDining,
    Patio,
    BarArea,
}

impl LocationFilter {
    pub const ALL: [LocationFilter; 4] = [
        LocationFilter::All,
        LocationFilter::MainDining,
        LocationFilter::Patio,
        LocationFilter::BarArea,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LocationFilter::All => "all",
            LocationFilter::MainDining => "main-dining",
            LocationFilter::Patio => "patio",
            LocationFilter::BarArea => "bar-area",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationFilter::All => "All Locations",
            LocationFilter::MainDining => "Main Dining",
            LocationFilter::Patio => "Patio",
            LocationFilter::BarArea => "Bar Area",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromotionFilter {
    #[default]
    All,
    BbqBurger,
    Pizza,
    Dessert,
}

impl PromotionFilter {
    pub const ALL: [PromotionFilter; 4] = [
        PromotionFilter::All,
        PromotionFilter::BbqBurger,
        PromotionFilter::Pizza,
        PromotionFilter::Dessert,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PromotionFilter::All => "all",
            PromotionFilter::BbqBurger => "bbq-burger",
            PromotionFilter::Pizza => "pizza",
            PromotionFilter::Dessert => "dessert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromotionFilter::All => "All Promotions",
            PromotionFilter::BbqBurger => "BBQ Burger Special",
            PromotionFilter::Pizza => "Pizza Promotion",
            PromotionFilter::Dessert => "Dessert Deal",
        }
    }
}

/// Raw query parameters; every field is optional and falls back to its default.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub section: Option<Section>,
    pub range: Option<DateRangePreset>,
    pub location: Option<LocationFilter>,
    pub promotion: Option<PromotionFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub section: Section,
    pub range: DateRangePreset,
    pub location: LocationFilter,
    pub promotion: PromotionFilter,
}

impl From<ViewQuery> for ViewState {
    fn from(query: ViewQuery) -> Self {
        ViewState {
            section: query.section.unwrap_or_default(),
            range: query.range.unwrap_or_default(),
            location: query.location.unwrap_or_default(),
            promotion: query.promotion.unwrap_or_default(),
        }
    }
}

impl ViewState {
    pub fn with_section(self, section: Section) -> Self {
        ViewState { section, ..self }
    }

    pub fn with_range(self, range: DateRangePreset) -> Self {
        ViewState { range, ..self }
    }

    #[cfg(test)]
    pub fn with_location(self, location: LocationFilter) -> Self {
        ViewState { location, ..self }
    }

    #[cfg(test)]
    pub fn with_promotion(self, promotion: PromotionFilter) -> Self {
        ViewState { promotion, ..self }
    }

    pub fn query_string(&self) -> String {
        format!(
            "section={}&range={}&location={}&promotion={}",
            self.section.key(),
            self.range.key(),
            self.location.key(),
            self.promotion.key()
        )
    }

    /// Human-readable descriptions of the non-default filters.
    pub fn active_filters(&self) -> Vec<String> {
        let mut active = Vec::new();
        if self.location != LocationFilter::All {
            active.push(format!("Location: {}", self.location.label()));
        }
        if self.promotion != PromotionFilter::All {
            active.push(format!("Promotion: {}", self.promotion.label()));
        }
        active
    }
}
