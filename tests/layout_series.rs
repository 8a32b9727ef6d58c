use campfin_charts::SeriesDatum;
use campfin_charts::layout::{gap_width, layout_extent, layout_proportional_series, total_width};

#[test]
fn empty_input_gives_empty_layout() {
    assert!(layout_proportional_series(&[]).is_empty());
}

#[test]
fn single_datum_outline() {
    let out = layout_proportional_series(&[SeriesDatum::new("A", 10.0, 5.0)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "A");
    assert_eq!(
        out[0].points,
        vec![[0.0, 0.0], [0.0, 5.0], [5.0, 5.0], [10.0, 5.0], [10.0, 0.0]]
    );
    assert_eq!(out[0].width, 10.0);
    assert_eq!(out[0].height, 5.0);
    assert_eq!(out[0].apex(), Some([5.0, 5.0]));
}

#[test]
fn second_bar_starts_after_gap() {
    let data = [SeriesDatum::new("A", 10.0, 5.0), SeriesDatum::new("B", 10.0, 3.0)];
    assert_eq!(total_width(&data), 20.0);
    assert_eq!(gap_width(&data), 2.0);

    let out = layout_proportional_series(&data);
    assert_eq!(
        out[1].points,
        vec![[12.0, 0.0], [12.0, 3.0], [17.0, 3.0], [22.0, 3.0], [22.0, 0.0]]
    );
    assert_eq!(layout_extent(&out), 22.0);
}

#[test]
fn uneven_widths_share_one_gap() {
    // mean width 4, gap 0.8
    let data = [
        SeriesDatum::new("short", 2.0, 1.0),
        SeriesDatum::new("long", 6.0, 2.0),
        SeriesDatum::new("mid", 4.0, 3.0),
    ];
    let out = layout_proportional_series(&data);
    let starts: Vec<f64> = out.iter().map(|r| r.points[0][0]).collect();
    assert!((starts[1] - 2.8).abs() < 1e-12);
    assert!((starts[2] - 9.6).abs() < 1e-12);
    assert!((layout_extent(&out) - 13.6).abs() < 1e-12);
}

#[test]
fn order_is_preserved_and_calls_are_idempotent() {
    let data: Vec<SeriesDatum> = ["c", "a", "b", "d"]
        .iter()
        .enumerate()
        .map(|(i, n)| SeriesDatum::new(*n, 1.0 + i as f64, 10.0 - i as f64))
        .collect();
    let first = layout_proportional_series(&data);
    let second = layout_proportional_series(&data);
    assert_eq!(first, second);
    let names: Vec<&str> = first.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["c", "a", "b", "d"]);
    for pair in first.windows(2) {
        assert!(pair[0].points[4][0] < pair[1].points[0][0]);
    }
}

#[test]
fn negative_height_outline_hangs_below_axis() {
    let out = layout_proportional_series(&[SeriesDatum::new("refund", 4.0, -2.0)]);
    assert_eq!(out[0].points[1], [0.0, -2.0]);
    assert_eq!(out[0].points[4], [4.0, 0.0]);
}

#[test]
fn layout_json_shape() {
    let out = layout_proportional_series(&[SeriesDatum::new("A", 10.0, 5.0)]);
    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v[0]["name"], "A");
    assert_eq!(v[0]["points"][2], serde_json::json!([5.0, 5.0]));
    assert_eq!(v[0]["width"], 10.0);
    assert_eq!(v[0]["height"], 5.0);
}
