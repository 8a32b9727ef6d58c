//! Interval durations and labels for time-bucketed series.
//!
//! Durations are kept as `f64` because quarters and months use an average
//! month of 30.4 days; the products are evaluated left to right so the values
//! match what charting front ends already compute for the same buckets.

use crate::models::IntervalUnit;
use chrono::DateTime;

const HOUR_MS: f64 = 3600.0 * 1000.0;
const DAY_MS: f64 = 24.0 * 3600.0 * 1000.0;

/// Returned by [`interval_duration_ms`] for an unrecognized unit.
pub const UNKNOWN_DURATION_MS: f64 = 1.0;

impl IntervalUnit {
    /// Length of one bucket in milliseconds.
    pub fn duration_ms(self) -> f64 {
        match self {
            IntervalUnit::Year => 365.0 * 24.0 * 3600.0 * 1000.0,
            IntervalUnit::Quarter => 3.0 * 30.4 * 24.0 * 3600.0 * 1000.0,
            // months vary in length, 30.4 days is the average
            IntervalUnit::Month => 30.4 * 24.0 * 3600.0 * 1000.0,
            IntervalUnit::Week => 7.0 * DAY_MS,
            IntervalUnit::Day => DAY_MS,
            IntervalUnit::Hour => HOUR_MS,
        }
    }

    /// `chrono` pattern used for bucket labels.
    pub fn label_pattern(self) -> &'static str {
        match self {
            IntervalUnit::Year => "%Y",
            IntervalUnit::Quarter | IntervalUnit::Month => "%B %Y",
            IntervalUnit::Week | IntervalUnit::Day => "%e %b %Y",
            IntervalUnit::Hour => "%H:00",
        }
    }

    /// Format a UTC timestamp as a bucket label, e.g. `"March 2024"` for months.
    ///
    /// Returns an empty string when the timestamp is outside the representable range.
    pub fn format_label(self, timestamp_ms: i64) -> String {
        match DateTime::from_timestamp_millis(timestamp_ms) {
            Some(dt) => dt.format(self.label_pattern()).to_string(),
            None => String::new(),
        }
    }
}

/// Duration in milliseconds for a unit given by name.
///
/// Unknown names are not an error: they map to [`UNKNOWN_DURATION_MS`] (`1`),
/// so callers cannot use the result to detect bad input. Parse into
/// [`IntervalUnit`] first when validation matters.
pub fn interval_duration_ms(unit: &str) -> f64 {
    unit.parse::<IntervalUnit>()
        .map(IntervalUnit::duration_ms)
        .unwrap_or(UNKNOWN_DURATION_MS)
}

/// Bucket label for a unit given by name. Unknown names yield an empty string.
pub fn format_interval_label(unit: &str, timestamp_ms: i64) -> String {
    match unit.parse::<IntervalUnit>() {
        Ok(u) => u.format_label(timestamp_ms),
        Err(e) => {
            log::debug!("{e}; using empty label");
            String::new()
        }
    }
}

/// Start timestamps of `count` consecutive buckets beginning at `start_ms`.
///
/// Stops early rather than wrap when a start would leave the `i64` range.
pub fn bucket_starts(start_ms: i64, unit: IntervalUnit, count: usize) -> Vec<i64> {
    let step = unit.duration_ms();
    (0..count)
        .map_while(|i| {
            let offset = (i as f64 * step).round();
            // 2^63 and above would saturate in the cast
            if offset >= i64::MAX as f64 {
                return None;
            }
            start_ms.checked_add(offset as i64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().timestamp_millis()
    }

    #[test]
    fn integral_durations() {
        assert_eq!(interval_duration_ms("year"), 31_536_000_000.0);
        assert_eq!(interval_duration_ms("week"), 604_800_000.0);
        assert_eq!(interval_duration_ms("day"), 86_400_000.0);
        assert_eq!(interval_duration_ms("hour"), 3_600_000.0);
    }

    #[test]
    fn fractional_durations_match_left_to_right_product() {
        assert_eq!(
            interval_duration_ms("quarter"),
            3.0 * 30.4 * 24.0 * 3600.0 * 1000.0
        );
        assert_eq!(interval_duration_ms("month"), 30.4 * 24.0 * 3600.0 * 1000.0);
    }

    #[test]
    fn unknown_unit_falls_back() {
        assert_eq!(interval_duration_ms("bogus"), 1.0);
        assert_eq!(interval_duration_ms(""), 1.0);
        assert_eq!(format_interval_label("bogus", 0), "");
    }

    #[test]
    fn labels_per_unit() {
        let t = ms(2024, 3, 5, 7);
        assert_eq!(format_interval_label("year", t), "2024");
        assert_eq!(format_interval_label("quarter", t), "March 2024");
        assert_eq!(format_interval_label("month", t), "March 2024");
        assert_eq!(format_interval_label("week", t), " 5 Mar 2024");
        assert_eq!(format_interval_label("day", ms(2024, 3, 15, 0)), "15 Mar 2024");
        assert_eq!(format_interval_label("hour", t), "07:00");
    }

    #[test]
    fn out_of_range_timestamp_gives_empty_label() {
        assert_eq!(IntervalUnit::Day.format_label(i64::MAX), "");
    }

    #[test]
    fn bucket_starts_step_by_duration() {
        let starts = bucket_starts(1_000, IntervalUnit::Day, 3);
        assert_eq!(starts, vec![1_000, 86_401_000, 172_801_000]);
        assert!(bucket_starts(0, IntervalUnit::Year, 0).is_empty());
    }

    #[test]
    fn bucket_starts_stop_before_overflow() {
        assert_eq!(bucket_starts(i64::MAX - 10, IntervalUnit::Day, 3), vec![i64::MAX - 10]);
        assert_eq!(bucket_starts(i64::MIN, IntervalUnit::Hour, 2), vec![i64::MIN, i64::MIN + 3_600_000]);
    }
}
