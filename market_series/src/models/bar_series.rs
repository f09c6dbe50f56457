//! A collection of daily bars for a specific symbol.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::bar::DailyBar;

/// Represents the daily history of a single symbol.
///
/// This struct groups a vector of [`DailyBar`]s with their corresponding
/// symbol, making the data set self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL", "DIS").
    pub symbol: String,
    /// The collection of daily bars, ascending by date.
    pub bars: Vec<DailyBar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Bars whose date falls in `[start, end]`, both inclusive.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<DailyBar> {
        self.bars
            .iter()
            .filter(|b| b.date >= start && b.date <= end)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
