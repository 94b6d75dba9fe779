//! Behavioral constants for data generation, aggregation, and session upkeep.

use chrono::Duration;

/// Days of history produced by the traffic generator, ending today.
pub const TRAILING_DAYS: u64 = 30;
/// First and last hour (inclusive) in which visits are sampled.
pub const OPEN_HOUR: u32 = 9;
pub const CLOSE_HOUR: u32 = 22;
pub const SAMPLE_INTERVAL_MINUTES: u32 = 15;
pub const OPERATING_HOURS: usize = (CLOSE_HOUR - OPEN_HOUR + 1) as usize;

/// Length of the current and previous comparison periods.
pub const PERIOD_DAYS: i64 = 7;

pub const DEFAULT_LOCATION: &str = "Main Dining";

/// Placeholder figures that are not derived from any input.
pub const AVG_DWELL_TIME_MINUTES: f64 = 12.5;
pub const PREVIOUS_REVENUE_PERCENT: u64 = 85;

/// Upper bound on live sessions; the least recently seen is evicted first.
pub const MAX_SESSIONS: usize = 512;
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::hours(6);
pub const PRUNE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(3600);
