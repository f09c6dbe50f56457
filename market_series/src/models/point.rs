use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anything that sits on a date axis and carries a close-like value.
///
/// The moving-average and rebasing transforms are written against this trait
/// so they accept daily bars, weekly bars and already derived points alike.
pub trait PricePoint {
    /// Position of the point on the date axis.
    fn date(&self) -> NaiveDate;
    /// The value the transforms operate on.
    fn close(&self) -> f64;
}

/// A dated scalar produced by one of the series transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Mean of `period` consecutive closes, dated at the window's last day.
pub type MaPoint = SeriesPoint;

/// `100 * close / first_close` of its own series.
pub type NormalizedPoint = SeriesPoint;

impl PricePoint for SeriesPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn close(&self) -> f64 {
        self.value
    }
}
