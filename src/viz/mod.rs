//! Visualization: render campaign-finance charts to **SVG** or **PNG**.
//!
//! - Donations per interval bucket as a column chart
//! - Two-series area charts (net funds, donations vs. expenditures)
//! - A 100px sparkline with a caller-pinned y range
//! - Proportional bars from [`crate::layout::layout_proportional_series`]
//!
//! Text (captions, axis labels, legends, bar names) needs a font registered
//! with [`register_font_file`]; the `ab_glyph` text path cannot discover
//! system fonts. Without one, charts are rendered as shapes only.

mod draw;
pub mod types;
pub mod util;

pub use types::{ChartKind, ChartOptions, SMALL_CHART_HEIGHT};

use crate::models::{IntervalUnit, LayoutResult, TimeSeries};
use anyhow::{Context, Result, anyhow, bail};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use draw::{AreaChart, ColumnChart, ProportionalChart};
use types::{DONATIONS_GREEN, INCOME_TEAL, OUTGOING_RED};

/// Path of the font currently registered as `sans-serif`.
static REGISTERED_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Register a TTF/OTF file as the `sans-serif` family used for all chart text.
///
/// plotters keeps registered font bytes for the life of the process, so each
/// distinct font is leaked once; registering the same file again is a no-op.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let mut current = REGISTERED_FONT.lock().unwrap_or_else(|e| e.into_inner());
    if current.as_deref() == Some(key.as_path()) {
        return Ok(());
    }
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font {}", path.display()))?;
    *current = Some(key);
    log::debug!("registered chart font {}", path.display());
    Ok(())
}

/// Whether chart text can be drawn.
pub fn fonts_registered() -> bool {
    REGISTERED_FONT
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .is_some()
}

/// Something that can be drawn onto any plotters backend.
pub(crate) trait DrawChart {
    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Pick the backend from the file extension (`.svg`, anything else is a bitmap) and draw.
fn render<C: DrawChart, P: AsRef<Path>>(chart: &C, out_path: P, size: (u32, u32)) -> Result<()> {
    if size.0 == 0 || size.1 == 0 {
        bail!("chart size must be non-zero, got {}x{}", size.0, size.1);
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        chart.draw_on(&root)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        chart.draw_on(&root)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    log::debug!("wrote chart {}", out_path.display());
    Ok(())
}

/// Column chart of donations, one bar per `unit` bucket.
pub fn plot_donations<P: AsRef<Path>>(
    series: &TimeSeries,
    unit: IntervalUnit,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    if series.is_empty() {
        bail!("no data to plot");
    }
    let chart = ColumnChart {
        series,
        unit,
        color: DONATIONS_GREEN,
        title: opts.title.as_deref(),
    };
    render(&chart, out_path, (opts.width, opts.height))
}

/// Area chart of funds available against debts.
pub fn plot_net_funds<P: AsRef<Path>>(
    funds: &TimeSeries,
    debts: &TimeSeries,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    plot_pair(
        ("Funds available", funds),
        ("Debts", debts),
        None,
        out_path,
        opts,
        true,
    )
}

/// Area chart of donations and loans against expenditures.
pub fn plot_donation_expenditure<P: AsRef<Path>>(
    donations: &TimeSeries,
    expenditures: &TimeSeries,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    plot_pair(
        ("Donations and loans", donations),
        ("Expenditures", expenditures),
        None,
        out_path,
        opts,
        true,
    )
}

/// Small 100px area chart with the y axis pinned to `y_range`, no legend or caption.
pub fn plot_small_donation_expend<P: AsRef<Path>>(
    donations: &TimeSeries,
    expenditures: &TimeSeries,
    y_range: (f64, f64),
    out_path: P,
    width: u32,
) -> Result<()> {
    let (min, max) = y_range;
    if !(min.is_finite() && max.is_finite() && min < max) {
        bail!("invalid y range {min}..{max}: min must be below max");
    }
    let opts = ChartOptions {
        width,
        height: SMALL_CHART_HEIGHT,
        title: None,
    };
    plot_pair(
        ("Donations", donations),
        ("Expenditures", expenditures),
        Some(y_range),
        out_path,
        &opts,
        false,
    )
}

fn plot_pair<P: AsRef<Path>>(
    (income_name, income): (&str, &TimeSeries),
    (outgoing_name, outgoing): (&str, &TimeSeries),
    y_range: Option<(f64, f64)>,
    out_path: P,
    opts: &ChartOptions,
    legend: bool,
) -> Result<()> {
    if income.is_empty() && outgoing.is_empty() {
        bail!("no data to plot");
    }
    let chart = AreaChart {
        series: [
            (income_name, income, INCOME_TEAL),
            (outgoing_name, outgoing, OUTGOING_RED),
        ],
        unit: IntervalUnit::Day,
        y_range,
        legend,
        title: opts.title.as_deref(),
    };
    render(&chart, out_path, (opts.width, opts.height))
}

/// Draw laid-out series as filled outlines, labelled with their names.
pub fn plot_proportional<P: AsRef<Path>>(
    layout: &[LayoutResult],
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    if layout.is_empty() {
        bail!("no data to plot");
    }
    let chart = ProportionalChart {
        layout,
        title: opts.title.as_deref(),
    };
    render(&chart, out_path, (opts.width, opts.height))
}
