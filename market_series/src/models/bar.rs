//! Canonical in-memory representation of daily and weekly OHLCV bars.
//!
//! [`DailyBar`] is what a [`BarSource`](crate::providers::BarSource) hands to
//! the engines; [`WeeklyBar`] is derived by
//! [`aggregate_to_weekly`](crate::aggregate::aggregate_to_weekly) and never
//! mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::point::PricePoint;

/// A single trading day for one instrument.
///
/// Dates are unique per instrument. Prices are positive; volume, dividends and
/// splits are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// The trading day.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the day.
    pub high: f64,

    /// Lowest price during the day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the day.
    pub volume: f64,

    /// Cash dividends paid on this day. Most sources omit it.
    #[serde(default)]
    pub dividends: f64,

    /// Split ratio applied on this day, 0 when there was none.
    #[serde(default)]
    pub stock_splits: f64,
}

/// One calendar week rolled up from its daily bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBar {
    /// Date of the last trading day in the week.
    pub date: NaiveDate,
    /// Open of the first trading day.
    pub open: f64,
    /// Highest daily high.
    pub high: f64,
    /// Lowest daily low.
    pub low: f64,
    /// Close of the last trading day.
    pub close: f64,
    /// Sum of daily volumes.
    pub volume: f64,
}

impl PricePoint for DailyBar {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn close(&self) -> f64 {
        self.close
    }
}

impl PricePoint for WeeklyBar {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn close(&self) -> f64 {
        self.close
    }
}
