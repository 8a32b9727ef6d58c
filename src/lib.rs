//! campfin_charts
//!
//! Time-bucket helpers, a proportional bar layout, and chart rendering for
//! campaign-finance series. Pairs with the `campfin` CLI.
//!
//! ### Features
//! - Interval durations in milliseconds (`year` … `hour`) and matching bucket labels
//! - Variable-width bar outlines separated by proportional gaps
//! - Tooltip text with whole-dollar amounts and drill-down links
//! - SVG/PNG column, area and proportional-bar charts
//!
//! ### Example
//! ```no_run
//! use campfin_charts::{IntervalUnit, SeriesDatum};
//! use campfin_charts::{interval, layout, storage, viz};
//!
//! assert_eq!(interval::interval_duration_ms("day"), 86_400_000.0);
//! let label = IntervalUnit::Month.format_label(1_709_251_200_000); // "March 2024"
//!
//! let bars = layout::layout_proportional_series(&[
//!     SeriesDatum::new("Q1", 13.0, 420.0),
//!     SeriesDatum::new("Q2", 12.5, 610.0),
//! ]);
//! storage::save_layout_json(&bars, "bars.json")?;
//! viz::plot_proportional(&bars, "bars.svg", &viz::ChartOptions::default())?;
//! # let _ = label;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod interval;
pub mod layout;
pub mod models;
pub mod storage;
pub mod tooltip;
pub mod viz;

pub use models::{IntervalUnit, LayoutResult, ParseIntervalError, SeriesDatum, TimePoint, TimeSeries};
