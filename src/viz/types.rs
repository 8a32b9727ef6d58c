//! Public types and constants for the visualization module.

use plotters::style::RGBColor;

/// Chart kinds available from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Column chart of donations per interval bucket.
    Donations,
    /// Area chart of funds available against debts.
    NetFunds,
    /// Area chart of donations and loans against expenditures.
    DonationExpenditure,
    /// 100px sparkline of donations against expenditures with a pinned y range.
    SmallDonationExpend,
}

/// Size and caption of a rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Drawn only when a font has been registered.
    pub title: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: None,
        }
    }
}

/// Fixed height of the small donations/expenditures chart.
pub const SMALL_CHART_HEIGHT: u32 = 100;

/// `#007F00`
pub const DONATIONS_GREEN: RGBColor = RGBColor(0, 127, 0);
/// `#007E85`
pub const INCOME_TEAL: RGBColor = RGBColor(0, 126, 133);
/// `#DD0000`
pub const OUTGOING_RED: RGBColor = RGBColor(221, 0, 0);
