//! Text shown when hovering or clicking a time bucket.

use crate::models::IntervalUnit;
use chrono::DateTime;
use num_format::{Locale, ToFormattedString};

/// Whole-dollar amount with thousands separators, e.g. `"$1,234"`.
///
/// The sign follows the currency symbol (`"$-50"`); non-finite input formats as `"$0"`.
pub fn format_currency(value: f64) -> String {
    let whole = if value.is_finite() {
        value.round() as i64
    } else {
        0
    };
    format!("${}", whole.to_formatted_string(&Locale::en))
}

/// Shared tooltip for one bucket: the bucket label, then one `name: amount` line per series.
pub fn tooltip_text(unit: IntervalUnit, timestamp_ms: i64, entries: &[(&str, f64)]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(unit.format_label(timestamp_ms));
    lines.extend(
        entries
            .iter()
            .map(|(name, v)| format!("{name}: {}", format_currency(*v))),
    );
    lines.join("\n")
}

/// Drill-down link for the donations made on the bucket's UTC date.
pub fn donations_link(timestamp_ms: i64) -> Option<String> {
    let dt = DateTime::from_timestamp_millis(timestamp_ms)?;
    Some(format!("/donations?date={}", dt.format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounding_and_sign() {
        assert_eq!(format_currency(1234.4), "$1,234");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(-1234567.0), "$-1,234,567");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn link_uses_utc_date() {
        // 2020-03-15T23:30:00Z
        assert_eq!(
            donations_link(1_584_315_000_000).as_deref(),
            Some("/donations?date=2020-03-15")
        );
        assert_eq!(donations_link(i64::MIN), None);
    }
}
