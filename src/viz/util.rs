//! Utility functions for visualization: colors, axis ranges, label sizing.

use crate::models::TimeSeries;
use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBColor {
    OFFICE10[idx % OFFICE10.len()]
}

/// Widen a degenerate `(min, max)` so plotters gets a non-empty range.
pub fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

/// Earliest and latest timestamp over all series, `None` when every series is empty.
pub fn time_bounds(series: &[&TimeSeries]) -> Option<(i64, i64)> {
    series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|p| p.timestamp_ms)
        .fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((t.min(lo), t.max(hi))),
        })
}

/// Value range over all series, always including the zero baseline.
pub fn value_bounds(series: &[&TimeSeries]) -> (f64, f64) {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Font size for a bar label, proportional to the bar's share of the widest bar.
/// Clamped to 10..=28 px.
pub fn label_font_px(width: f64, max_width: f64) -> u32 {
    if max_width.is_nan() || max_width <= 0.0 || !width.is_finite() {
        return 10;
    }
    let share = (width / max_width).clamp(0.0, 1.0);
    (10.0 + 18.0 * share).round() as u32
}
