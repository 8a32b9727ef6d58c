use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::util::{label_font_px, office_color, padded_range, time_bounds, value_bounds};
use super::{DrawChart, fonts_registered};
use crate::layout::layout_extent;
use crate::models::{IntervalUnit, LayoutResult, TimeSeries};
use crate::tooltip::format_currency;

const MARGIN: u32 = 16;
/// Share of a bucket covered by its column.
const COLUMN_FILL: f64 = 0.8;

fn caption_and_axes<'a, 'b, DB: DrawingBackend>(
    builder: &mut ChartBuilder<'a, 'b, DB>,
    title: Option<&str>,
) {
    builder.margin(MARGIN);
    if !fonts_registered() {
        return;
    }
    if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
        builder.caption(t, (FontFamily::SansSerif, 20));
    }
    builder
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
}

pub(super) struct ColumnChart<'s> {
    pub series: &'s TimeSeries,
    pub unit: IntervalUnit,
    pub color: RGBColor,
    pub title: Option<&'s str>,
}

impl DrawChart for ColumnChart<'_> {
    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let step = self.unit.duration_ms();
        let (t0, t1) = time_bounds(&[self.series]).ok_or_else(|| anyhow!("no data to plot"))?;
        let x_range = (t0 as f64)..(t1 as f64 + step);
        // donations never go below zero on this chart
        let (_, y_max) = value_bounds(&[self.series]);
        let (y_min, y_max) = (0.0, if y_max > 0.0 { y_max } else { 1.0 });

        let mut builder = ChartBuilder::on(root);
        caption_and_axes(&mut builder, self.title);
        let mut chart = builder
            .build_cartesian_2d(x_range, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        if fonts_registered() {
            let unit = self.unit;
            let x_fmt = move |x: &f64| unit.format_label(x.round() as i64);
            let y_fmt = |v: &f64| format_currency(*v);
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(self.series.points.len().min(12))
                .y_labels(8)
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt)
                .label_style((FontFamily::SansSerif, 12))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        let color = self.color;
        chart
            .draw_series(self.series.points.iter().map(|p| {
                let x0 = p.timestamp_ms as f64;
                let top = p.value.max(0.0);
                Rectangle::new([(x0, 0.0), (x0 + step * COLUMN_FILL, top)], color.filled())
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}

pub(super) struct AreaChart<'s> {
    /// (legend name, data, color) drawn in order.
    pub series: [(&'s str, &'s TimeSeries, RGBColor); 2],
    pub unit: IntervalUnit,
    /// Pinned y range; derived from the data when `None`.
    pub y_range: Option<(f64, f64)>,
    pub legend: bool,
    pub title: Option<&'s str>,
}

impl DrawChart for AreaChart<'_> {
    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let all: Vec<&TimeSeries> = self.series.iter().map(|(_, s, _)| *s).collect();
        let (t0, t1) = time_bounds(&all).ok_or_else(|| anyhow!("no data to plot"))?;
        let (x_min, x_max) = padded_range(t0 as f64, t1 as f64);
        let (y_min, y_max) = match self.y_range {
            Some(r) => r,
            None => {
                let (lo, hi) = value_bounds(&all);
                padded_range(lo, hi)
            }
        };
        let baseline = 0.0f64.clamp(y_min, y_max);

        let mut builder = ChartBuilder::on(root);
        caption_and_axes(&mut builder, self.title);
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        let text = fonts_registered();
        if text {
            let unit = self.unit;
            let x_fmt = move |x: &f64| unit.format_label(x.round() as i64);
            let y_fmt = |v: &f64| format_currency(*v);
            chart
                .configure_mesh()
                .x_labels(6)
                .y_labels(6)
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt)
                .label_style((FontFamily::SansSerif, 12))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        for (name, series, color) in self.series.iter() {
            if series.is_empty() {
                continue;
            }
            let color = *color;
            let data: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|p| (p.timestamp_ms as f64, p.value.clamp(y_min, y_max)))
                .collect();
            let elem = chart
                .draw_series(
                    AreaSeries::new(data, baseline, color.mix(0.35).filled())
                        .border_style(color.stroke_width(2)),
                )
                .map_err(|e| anyhow!("{:?}", e))?;
            if text && self.legend {
                elem.label(name.to_string()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
            }
        }

        if text && self.legend {
            chart
                .configure_series_labels()
                .border_style(RGBColor(204, 204, 204))
                .position(SeriesLabelPosition::UpperMiddle)
                .background_style(WHITE.mix(0.85))
                .label_font((FontFamily::SansSerif, 14))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        Ok(())
    }
}

pub(super) struct ProportionalChart<'s> {
    pub layout: &'s [LayoutResult],
    pub title: Option<&'s str>,
}

impl DrawChart for ProportionalChart<'_> {
    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let text = fonts_registered();
        let (x_min, x_max) = padded_range(0.0, layout_extent(self.layout));
        let (lo, hi) = self
            .layout
            .iter()
            .map(|r| r.height)
            .filter(|h| h.is_finite())
            .fold((0.0f64, 0.0f64), |(lo, hi), h| (lo.min(h), hi.max(h)));
        // headroom for the names drawn above each apex
        let hi = if text { hi * 1.15 } else { hi };
        let (y_min, y_max) = padded_range(lo, hi);

        let mut builder = ChartBuilder::on(root);
        caption_and_axes(&mut builder, self.title);
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        if text {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_labels(8)
                .label_style((FontFamily::SansSerif, 12))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        for (idx, r) in self.layout.iter().enumerate() {
            let color = office_color(idx);
            let outline: Vec<(f64, f64)> = r.points.iter().map(|p| (p[0], p[1])).collect();
            chart
                .draw_series(std::iter::once(Polygon::new(outline, color.mix(0.8).filled())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        if text {
            let max_width = self.layout.iter().map(|r| r.width).fold(0.0, f64::max);
            chart
                .draw_series(self.layout.iter().filter_map(|r| {
                    let [x, y] = r.apex()?;
                    let px = label_font_px(r.width, max_width);
                    let style = (FontFamily::SansSerif, px as f64)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Center, VPos::Bottom));
                    Some(Text::new(r.name.clone(), (x, y.max(0.0)), style))
                }))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        Ok(())
    }
}
