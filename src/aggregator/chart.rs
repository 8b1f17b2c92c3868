use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::DayCount;

/// One `[timestamp_ms, count]` point; serializes as a two element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint(pub i64, pub u64);

pub type ChartSeries = Vec<ChartPoint>;

/// Turn per-day counts into a plotting series, one point per day in date order.
pub fn format_data(counts: &DayCount) -> ChartSeries {
    counts
        .iter()
        .map(|(day, count)| ChartPoint(local_midnight_millis(*day), *count))
        .collect()
}

/// Milliseconds since the epoch at the start of `day` in the local time zone.
pub fn local_midnight_millis(day: NaiveDate) -> i64 {
    start_of_day_millis(&Local, day)
}

/// First whole hour of `day` that exists in `tz`. A day the zone skips
/// entirely (e.g. a date-line change) falls back to UTC midnight.
fn start_of_day_millis<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> i64 {
    let midnight = day.and_time(NaiveTime::MIN);

    (0..24)
        .find_map(|hour| tz.from_local_datetime(&(midnight + Duration::hours(hour))).earliest())
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight).timestamp_millis())
}
