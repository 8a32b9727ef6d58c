use crate::models::{LayoutResult, SeriesDatum, TimePoint, TimeSeries};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const VERTEX_NAMES: [&str; 5] = ["base_left", "top_left", "apex", "top_right", "base_right"];

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn guard_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Load series data: a JSON array of `{name, x, y}` or a CSV with header `name,x,y`.
pub fn load_series_data<P: AsRef<Path>>(path: P) -> Result<Vec<SeriesDatum>> {
    let path = path.as_ref();
    if is_json(path) {
        let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let data: Vec<SeriesDatum> = serde_json::from_reader(f)
            .with_context(|| format!("parsing series data from {}", path.display()))?;
        return Ok(data);
    }
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<SeriesDatum>().enumerate() {
        let datum = row.with_context(|| format!("{} row {}", path.display(), i + 1))?;
        out.push(datum);
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct TimeRow {
    date: String,
    value: Option<f64>,
}

fn parse_timestamp(s: &str) -> Option<i64> {
    if let Ok(ms) = s.parse::<i64>() {
        return Some(ms);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Load one time series.
///
/// JSON input is an array of `[timestamp_ms, value]` pairs. CSV input has the
/// header `date,value` where `date` is `YYYY-MM-DD` (UTC midnight) or a
/// millisecond timestamp. CSV rows with an empty value are skipped.
pub fn load_time_series<P: AsRef<Path>>(path: P, name: &str) -> Result<TimeSeries> {
    let path = path.as_ref();
    if is_json(path) {
        let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let pairs: Vec<(i64, f64)> = serde_json::from_reader(f)
            .with_context(|| format!("parsing time series from {}", path.display()))?;
        let points = pairs
            .into_iter()
            .map(|(timestamp_ms, value)| TimePoint {
                timestamp_ms,
                value,
            })
            .collect();
        return Ok(TimeSeries::new(name, points));
    }

    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut points = Vec::new();
    for (i, row) in rdr.deserialize::<TimeRow>().enumerate() {
        let row = row.with_context(|| format!("{} row {}", path.display(), i + 1))?;
        let timestamp_ms = parse_timestamp(&row.date).ok_or_else(|| {
            anyhow!(
                "{} row {}: invalid date {:?}, expected YYYY-MM-DD or milliseconds",
                path.display(),
                i + 1,
                row.date
            )
        })?;
        match row.value {
            Some(value) => points.push(TimePoint {
                timestamp_ms,
                value,
            }),
            None => log::warn!("{} row {}: no value, skipped", path.display(), i + 1),
        }
    }
    points.sort_by_key(|p| p.timestamp_ms);
    Ok(TimeSeries::new(name, points))
}

/// Save layout results as a pretty JSON array.
pub fn save_layout_json<P: AsRef<Path>>(results: &[LayoutResult], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(results)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save layout results as CSV, one row per vertex.
pub fn save_layout_csv<P: AsRef<Path>>(results: &[LayoutResult], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("name", "vertex", "x", "y", "width", "height"))?;
    for r in results {
        let name = guard_cell(&r.name);
        for (vertex, p) in VERTEX_NAMES.iter().zip(&r.points) {
            wtr.serialize((&name, vertex, p[0], p[1], r.width, r.height))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_proportional_series;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let res = layout_proportional_series(&[SeriesDatum::new("A", 2.0, 1.0)]);
        save_layout_csv(&res, &csvp).unwrap();
        save_layout_json(&res, &jsonp).unwrap();
        assert_eq!(std::fs::read_to_string(&csvp).unwrap().lines().count(), 6);
        assert!(jsonp.exists());
    }

    #[test]
    fn timestamps_parse_as_date_or_millis() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("12345"), Some(12_345));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn guard_cell_prefixes_formula_starters() {
        assert_eq!(guard_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(guard_cell("-1"), "'-1");
        assert_eq!(guard_cell("Smith for Senate"), "Smith for Senate");
    }
}
