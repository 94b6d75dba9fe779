use chrono::Weekday;
use rand::Rng;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::{CLOSE_HOUR, OPEN_HOUR};

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const PEAK_HOURS: [u32; 2] = [12, 18];
const PEAK_BASE: f64 = 60.0;
const OFF_PEAK_BASE: f64 = 30.0;
const WEEKEND_BOOST: f64 = 15.0;
const JITTER: f64 = 20.0;

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One hour of the day-by-hour grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub hour: String,
    values: [u32; 7],
}

impl HeatmapRow {
    pub fn value(&self, day: Weekday) -> u32 {
        self.values[day.num_days_from_monday() as usize]
    }
}

// Serializes as `{"hour": "12:00", "Monday": 71, ...}`.
impl Serialize for HeatmapRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + WEEKDAYS.len()))?;
        map.serialize_entry("hour", &self.hour)?;
        for day in WEEKDAYS {
            map.serialize_entry(day_name(day), &self.value(day))?;
        }
        map.end()
    }
}

pub fn generate_heatmap<R: Rng + ?Sized>(rng: &mut R) -> Vec<HeatmapRow> {
    (OPEN_HOUR..=CLOSE_HOUR)
        .map(|hour| {
            let base = if PEAK_HOURS.contains(&hour) {
                PEAK_BASE
            } else {
                OFF_PEAK_BASE
            };
            let values = WEEKDAYS.map(|day| {
                let boost = match day {
                    Weekday::Sat | Weekday::Sun => WEEKEND_BOOST,
                    _ => 0.0,
                };
                (base + boost + rng.gen_range(0.0..JITTER)).floor() as u32
            });
            HeatmapRow {
                hour: format!("{hour:02}:00"),
                values,
            }
        })
        .collect()
}

pub fn max_value(rows: &[HeatmapRow]) -> u32 {
    rows.iter()
        .flat_map(|row| row.values)
        .max()
        .unwrap_or(0)
}

/// Colour band for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Minimal,
    Low,
    Medium,
    High,
    Peak,
}

impl Intensity {
    pub fn for_value(value: u32) -> Self {
        match value {
            80.. => Intensity::Peak,
            60..80 => Intensity::High,
            40..60 => Intensity::Medium,
            20..40 => Intensity::Low,
            _ => Intensity::Minimal,
        }
    }

    pub fn all() -> [Intensity; 5] {
        [
            Intensity::Minimal,
            Intensity::Low,
            Intensity::Medium,
            Intensity::High,
            Intensity::Peak,
        ]
    }
}
