use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named time granularity used to bucket series and pick label formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
}

impl IntervalUnit {
    /// Every unit, coarsest first.
    pub const ALL: [IntervalUnit; 6] = [
        IntervalUnit::Year,
        IntervalUnit::Quarter,
        IntervalUnit::Month,
        IntervalUnit::Week,
        IntervalUnit::Day,
        IntervalUnit::Hour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Year => "year",
            IntervalUnit::Quarter => "quarter",
            IntervalUnit::Month => "month",
            IntervalUnit::Week => "week",
            IntervalUnit::Day => "day",
            IntervalUnit::Hour => "hour",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known [`IntervalUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntervalError {
    #[error("unknown interval unit: {0:?} (expected year, quarter, month, week, day or hour)")]
    Unknown(String),
}

impl FromStr for IntervalUnit {
    type Err = ParseIntervalError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        IntervalUnit::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseIntervalError::Unknown(s.to_string()))
    }
}

/// One named (width, height) pair to be drawn as a proportionally spaced bar.
///
/// `x` is the width (e.g. the length of a reporting period in weeks) and `y`
/// the magnitude (e.g. the amount contributed per week in that period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDatum {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl SeriesDatum {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// Computed outline for one [`SeriesDatum`].
///
/// `points` always holds five vertices in this order: base-left, top-left,
/// apex (half width), top-right, base-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub width: f64,
    pub height: f64,
}

impl LayoutResult {
    /// Mid-top vertex, where a data label is anchored.
    pub fn apex(&self) -> Option<[f64; 2]> {
        self.points.get(2).copied()
    }
}

/// One bucket of a time series (UTC milliseconds since the epoch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

/// Named sequence of buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<TimePoint>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<TimePoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
