use std::collections::BTreeMap;
use std::f64::consts::PI;

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use serde::Serialize;

use crate::config::{
    CLOSE_HOUR, DEFAULT_LOCATION, OPEN_HOUR, OPERATING_HOURS, PERIOD_DAYS, SAMPLE_INTERVAL_MINUTES,
    TRAILING_DAYS,
};

const BASELINE: f64 = 20.0;
const MIN_CUSTOMERS: u32 = 5;
const JITTER: f64 = 5.0;

/// Labels for daily rows, assigned by position rather than by real weekday.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One 15-minute observation of customers at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitSample {
    pub timestamp: NaiveDateTime,
    pub customer_count: u32,
    pub location: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyBucket {
    pub hour: String,
    pub current: u64,
    pub previous: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    pub day: &'static str,
    pub current: u64,
    pub previous: u64,
}

fn day_shape(hour: u32) -> f64 {
    ((hour as f64 - 12.0) / 12.0 * PI).sin() * 15.0 + 20.0
}

/// Produces samples for every sampling slot of the operating hours over the
/// trailing window ending on `today`.
pub fn generate_traffic<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<VisitSample> {
    let slots_per_hour = (60 / SAMPLE_INTERVAL_MINUTES) as usize;
    let mut samples =
        Vec::with_capacity(TRAILING_DAYS as usize * OPERATING_HOURS * slots_per_hour);

    for days_back in (0..TRAILING_DAYS).rev() {
        let Some(date) = today.checked_sub_days(Days::new(days_back)) else {
            continue;
        };
        for hour in OPEN_HOUR..=CLOSE_HOUR {
            for minute in (0..60).step_by(SAMPLE_INTERVAL_MINUTES as usize) {
                let Some(timestamp) = date.and_hms_opt(hour, minute, 0) else {
                    continue;
                };
                let jitter = rng.gen_range(-JITTER..JITTER);
                let raw = (BASELINE + day_shape(hour) + jitter).floor();
                let customer_count = (raw.max(0.0) as u32).max(MIN_CUSTOMERS);

                samples.push(VisitSample {
                    timestamp,
                    customer_count,
                    location: DEFAULT_LOCATION,
                });
            }
        }
    }

    samples
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Current,
    Previous,
}

/// Two adjacent comparison windows: `[now - 7d, ..)` and `[now - 14d, now - 7d)`.
///
/// The current window is open-ended so samples later on the same day still count.
#[derive(Debug, Clone, Copy)]
pub struct PeriodWindow {
    current_start: NaiveDateTime,
    previous_start: NaiveDateTime,
}

impl PeriodWindow {
    pub fn ending_at(now: NaiveDateTime) -> Self {
        PeriodWindow {
            current_start: now - Duration::days(PERIOD_DAYS),
            previous_start: now - Duration::days(PERIOD_DAYS * 2),
        }
    }

    pub fn classify(&self, ts: NaiveDateTime) -> Option<Period> {
        if ts >= self.current_start {
            Some(Period::Current)
        } else if ts >= self.previous_start {
            Some(Period::Previous)
        } else {
            None
        }
    }
}

/// Average customers per operating hour for both periods.
///
/// Each hour's sum is divided by the period length in days, not by the number
/// of days that actually contributed.
pub fn hourly_traffic(samples: &[VisitSample], now: NaiveDateTime) -> Vec<HourlyBucket> {
    let window = PeriodWindow::ending_at(now);
    let mut current = [0u64; 24];
    let mut previous = [0u64; 24];

    for sample in samples {
        let hour = sample.timestamp.hour() as usize;
        match window.classify(sample.timestamp) {
            Some(Period::Current) => current[hour] += u64::from(sample.customer_count),
            Some(Period::Previous) => previous[hour] += u64::from(sample.customer_count),
            None => {}
        }
    }

    let days = PERIOD_DAYS as u64;
    (OPEN_HOUR..=CLOSE_HOUR)
        .map(|hour| HourlyBucket {
            hour: format!("{hour:02}:00"),
            current: current[hour as usize] / days,
            previous: previous[hour as usize] / days,
        })
        .collect()
}

/// Daily totals for the last seven current-period dates.
///
/// Previous-period values are paired by sorted index, not by weekday, and the
/// rows are labelled Mon..Sun by position.
pub fn daily_traffic(samples: &[VisitSample], now: NaiveDateTime) -> Vec<DailyBucket> {
    let window = PeriodWindow::ending_at(now);
    let mut current: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut previous: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for sample in samples {
        let totals = match window.classify(sample.timestamp) {
            Some(Period::Current) => &mut current,
            Some(Period::Previous) => &mut previous,
            None => continue,
        };
        *totals.entry(sample.timestamp.date()).or_default() += u64::from(sample.customer_count);
    }

    let skip = current.len().saturating_sub(DAY_LABELS.len());
    let previous: Vec<u64> = previous.into_values().collect();

    current
        .into_values()
        .skip(skip)
        .zip(DAY_LABELS)
        .enumerate()
        .map(|(index, (count, day))| DailyBucket {
            day,
            current: count,
            previous: previous.get(index).copied().unwrap_or(0),
        })
        .collect()
}

/// Sums of customers in the current and previous periods.
pub fn period_totals(samples: &[VisitSample], now: NaiveDateTime) -> (u64, u64) {
    let window = PeriodWindow::ending_at(now);
    samples
        .iter()
        .fold((0, 0), |(current, previous), sample| {
            let count = u64::from(sample.customer_count);
            match window.classify(sample.timestamp) {
                Some(Period::Current) => (current + count, previous),
                Some(Period::Previous) => (current, previous + count),
                None => (current, previous),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }

    fn sample(timestamp: NaiveDateTime, customer_count: u32) -> VisitSample {
        VisitSample {
            timestamp,
            customer_count,
            location: DEFAULT_LOCATION,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    #[test]
    fn generator_covers_every_slot_above_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate_traffic(&mut rng, today());

        assert_eq!(samples.len(), 30 * 14 * 4);
        assert!(samples.iter().all(|s| s.customer_count >= 5));
        assert!(
            samples
                .iter()
                .all(|s| (OPEN_HOUR..=CLOSE_HOUR).contains(&s.timestamp.hour()))
        );
        assert_eq!(samples.first().unwrap().timestamp, at(today() - Days::new(29), 9, 0));
        assert_eq!(samples.last().unwrap().timestamp, at(today(), 22, 45));
    }

    #[test]
    fn generator_is_reproducible_with_same_seed() {
        let a = generate_traffic(&mut StdRng::seed_from_u64(42), today());
        let b = generate_traffic(&mut StdRng::seed_from_u64(42), today());
        assert_eq!(a, b);
    }

    #[test]
    fn generated_counts_follow_the_hour_curve() {
        let samples = generate_traffic(&mut StdRng::seed_from_u64(1), today());
        for s in &samples {
            let expected = BASELINE + day_shape(s.timestamp.hour());
            let count = s.customer_count as f64;
            assert!(count >= (expected - JITTER).floor().max(5.0));
            assert!(count < expected + JITTER);
        }
    }

    #[test]
    fn window_splits_current_and_previous() {
        let now = at(today(), 15, 0);
        let window = PeriodWindow::ending_at(now);

        assert_eq!(window.classify(now), Some(Period::Current));
        assert_eq!(window.classify(at(today(), 22, 45)), Some(Period::Current));
        assert_eq!(
            window.classify(now - Duration::days(7)),
            Some(Period::Current)
        );
        assert_eq!(
            window.classify(now - Duration::days(7) - Duration::seconds(1)),
            Some(Period::Previous)
        );
        assert_eq!(window.classify(now - Duration::days(14)), Some(Period::Previous));
        assert_eq!(
            window.classify(now - Duration::days(14) - Duration::seconds(1)),
            None
        );
    }

    #[test]
    fn hourly_has_fourteen_ordered_rows() {
        let now = at(today(), 12, 0);
        let samples = generate_traffic(&mut StdRng::seed_from_u64(3), today());
        let hourly = hourly_traffic(&samples, now);

        let hours: Vec<&str> = hourly.iter().map(|b| b.hour.as_str()).collect();
        assert_eq!(
            hours,
            [
                "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
                "18:00", "19:00", "20:00", "21:00", "22:00"
            ]
        );
    }

    #[test]
    fn hourly_divides_sums_by_seven_and_floors() {
        let now = at(today(), 23, 0);
        let samples = vec![
            sample(at(today(), 10, 0), 10),
            sample(at(today(), 10, 15), 10),
            sample(at(today() - Days::new(1), 10, 30), 3),
            sample(at(today() - Days::new(10), 12, 0), 20),
            // Too old for either period.
            sample(at(today() - Days::new(20), 12, 0), 500),
        ];

        let hourly = hourly_traffic(&samples, now);
        let ten = hourly.iter().find(|b| b.hour == "10:00").unwrap();
        assert_eq!((ten.current, ten.previous), (3, 0));
        let noon = hourly.iter().find(|b| b.hour == "12:00").unwrap();
        assert_eq!((noon.current, noon.previous), (0, 2));
        let nine = hourly.iter().find(|b| b.hour == "09:00").unwrap();
        assert_eq!((nine.current, nine.previous), (0, 0));
    }

    #[test]
    fn hourly_of_empty_series_is_all_zero() {
        let hourly = hourly_traffic(&[], at(today(), 12, 0));
        assert_eq!(hourly.len(), 14);
        assert!(hourly.iter().all(|b| b.current == 0 && b.previous == 0));
    }

    #[test]
    fn daily_has_seven_positional_rows() {
        let now = at(today(), 12, 0);
        let samples = generate_traffic(&mut StdRng::seed_from_u64(9), today());
        let daily = daily_traffic(&samples, now);

        let labels: Vec<&str> = daily.iter().map(|b| b.day).collect();
        assert_eq!(labels, DAY_LABELS);
        assert!(daily.iter().all(|b| b.current > 0 && b.previous > 0));
    }

    #[test]
    fn daily_pairs_previous_dates_by_index() {
        let now = at(today(), 23, 59);
        let mut samples = Vec::new();
        // Current period: today and the six days before, count = 100 + offset.
        for offset in 0..7u64 {
            let date = today() - Days::new(6 - offset);
            samples.push(sample(at(date, 12, 0), 100 + offset as u32));
        }
        // Previous period has only three dates.
        for (i, days_back) in [13u64, 11, 9].into_iter().enumerate() {
            samples.push(sample(at(today() - Days::new(days_back), 12, 0), 10 * (i as u32 + 1)));
        }

        let daily = daily_traffic(&samples, now);
        assert_eq!(daily.len(), 7);
        let current: Vec<u64> = daily.iter().map(|b| b.current).collect();
        assert_eq!(current, [100, 101, 102, 103, 104, 105, 106]);
        let previous: Vec<u64> = daily.iter().map(|b| b.previous).collect();
        assert_eq!(previous, [10, 20, 30, 0, 0, 0, 0]);
    }

    #[test]
    fn daily_keeps_only_last_seven_current_dates() {
        // With a mid-day `now`, the current period touches eight dates.
        let now = at(today(), 12, 0);
        let mut samples = Vec::new();
        for days_back in 0..8u64 {
            samples.push(sample(at(today() - Days::new(days_back), 18, 0), 1));
        }
        samples.push(sample(at(today() - Days::new(7), 13, 0), 1000));

        let daily = daily_traffic(&samples, now);
        assert_eq!(daily.len(), 7);
        assert!(daily.iter().all(|b| b.current == 1));
    }

    #[test]
    fn daily_with_few_dates_is_short_and_safe() {
        let now = at(today(), 23, 0);
        let samples = vec![sample(at(today(), 12, 0), 40)];
        let daily = daily_traffic(&samples, now);
        assert_eq!(
            daily,
            vec![DailyBucket {
                day: "Mon",
                current: 40,
                previous: 0
            }]
        );
        assert!(daily_traffic(&[], now).is_empty());
    }

    #[test]
    fn period_totals_match_window() {
        let now = at(today(), 23, 0);
        let samples = vec![
            sample(at(today(), 12, 0), 40),
            sample(at(today() - Days::new(8), 12, 0), 25),
            sample(at(today() - Days::new(15), 12, 0), 99),
        ];
        assert_eq!(period_totals(&samples, now), (40, 25));
    }
}
