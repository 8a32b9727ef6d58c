use crate::models::{LayoutResult, SeriesDatum};

/// Share of the mean element width left empty between neighbours.
pub const GAP_RATIO: f64 = 0.2;

/// Sum of all widths.
pub fn total_width(data: &[SeriesDatum]) -> f64 {
    data.iter().map(|d| d.x).sum()
}

/// Gap inserted between adjacent elements: 20% of the mean width (0 for no data).
pub fn gap_width(data: &[SeriesDatum]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    total_width(data) / data.len() as f64 * GAP_RATIO
}

/// Lay out variable-width bars along the x axis, left to right in input order.
///
/// Each bar becomes a 5-vertex outline anchored at `y = 0`:
/// `(x, 0), (x, h), (x + w/2, h), (x + w, h), (x + w, 0)`.
/// Bars are separated by [`gap_width`]; there is no gap before the first or
/// after the last one.
///
/// ```
/// use campfin_charts::layout::layout_proportional_series;
/// use campfin_charts::SeriesDatum;
///
/// let out = layout_proportional_series(&[
///     SeriesDatum::new("A", 10.0, 5.0),
///     SeriesDatum::new("B", 10.0, 3.0),
/// ]);
/// assert_eq!(out[1].points[0], [12.0, 0.0]);
/// ```
pub fn layout_proportional_series(data: &[SeriesDatum]) -> Vec<LayoutResult> {
    if data.is_empty() {
        return Vec::new();
    }
    let gap = gap_width(data);

    let out: Vec<LayoutResult> = data
        .iter()
        .scan(0.0f64, |cursor, d| {
            let x = *cursor;
            *cursor = x + d.x + gap;
            Some(outline(x, d))
        })
        .collect();
    log::debug!(
        "laid out {} series, gap {gap}, extent {}",
        out.len(),
        layout_extent(&out)
    );
    out
}

fn outline(x: f64, d: &SeriesDatum) -> LayoutResult {
    let (w, h) = (d.x, d.y);
    LayoutResult {
        name: d.name.clone(),
        points: vec![[x, 0.0], [x, h], [x + w / 2.0, h], [x + w, h], [x + w, 0.0]],
        width: w,
        height: h,
    }
}

/// Largest x coordinate over all vertices (0 when empty).
pub fn layout_extent(results: &[LayoutResult]) -> f64 {
    results
        .iter()
        .flat_map(|r| r.points.iter())
        .map(|p| p[0])
        .fold(0.0, f64::max)
}
