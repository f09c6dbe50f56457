//! Summary of the range a user brushed on the price chart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::point::PricePoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub start_index: usize,
    pub end_index: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    /// `end_price >= start_price`.
    pub increased: bool,
    pub percent_change: f64,
    /// Number of bars between the two ends (`end_index - start_index`).
    pub span: usize,
}

/// Summarizes `series[start..=end]` after clamping both indices into the
/// series. Returns `None` for an empty series.
///
/// The indices come from a slider, so an inverted selection is reordered
/// rather than rejected.
pub fn summarize<P: PricePoint>(series: &[P], start: usize, end: usize) -> Option<RangeSummary> {
    let last = series.len().checked_sub(1)?;
    let (a, b) = (start.min(last), end.min(last));
    let (start_index, end_index) = if a <= b { (a, b) } else { (b, a) };

    let (first, final_) = (&series[start_index], &series[end_index]);
    let (start_price, end_price) = (first.close(), final_.close());
    Some(RangeSummary {
        start_index,
        end_index,
        start_date: first.date(),
        end_date: final_.date(),
        start_price,
        end_price,
        increased: end_price >= start_price,
        percent_change: (end_price - start_price) / start_price * 100.0,
        span: end_index - start_index,
    })
}
