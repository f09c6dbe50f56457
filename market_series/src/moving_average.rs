//! Simple moving averages and their resampling onto coarser date axes.
//!
//! The price chart draws weekly bars but computes its averages on daily
//! closes; [`map_to_reference`] snaps each weekly date to the nearest daily
//! average so several windows can be overlaid without recomputing per-day
//! data.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::point::{MaPoint, PricePoint, SeriesPoint};

/// One moving-average line resampled onto the chart's dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaOverlay {
    pub period: usize,
    pub points: Vec<SeriesPoint>,
}

/// Mean of each run of `period` consecutive closes, dated at the run's last
/// point.
///
/// Returns `len - period + 1` points in input order, or nothing when the
/// series is shorter than `period`.
pub fn moving_average<P: PricePoint>(series: &[P], period: NonZeroUsize) -> Vec<MaPoint> {
    let p = period.get();
    series
        .windows(p)
        .map(|window| {
            let sum: f64 = window.iter().map(PricePoint::close).sum();
            MaPoint {
                date: window[p - 1].date(),
                value: sum / p as f64,
            }
        })
        .collect()
}

/// Index of the MA point nearest to `date`.
///
/// `ma` must be ascending by date. On an exact tie the earlier point wins, and
/// among points sharing a date the first one wins, matching a front-to-back
/// linear scan.
fn nearest_index(ma: &[MaPoint], date: NaiveDate) -> usize {
    let after = ma.partition_point(|p| p.date < date);
    if after == 0 {
        return 0;
    }
    let mut before = after - 1;
    while before > 0 && ma[before - 1].date == ma[before].date {
        before -= 1;
    }
    if after == ma.len() {
        return before;
    }

    let before_gap = (date - ma[before].date).num_days();
    let after_gap = (ma[after].date - date).num_days();
    if before_gap <= after_gap { before } else { after }
}

/// Resamples `ma` onto `reference` dates by nearest date.
///
/// Returns `None` when `ma` is empty: there is nothing to snap to, and the
/// caller should skip the overlay.
pub fn map_to_reference(reference: &[NaiveDate], ma: &[MaPoint]) -> Option<Vec<SeriesPoint>> {
    if ma.is_empty() {
        return None;
    }
    Some(
        reference
            .iter()
            .map(|&date| SeriesPoint {
                date,
                value: ma[nearest_index(ma, date)].value,
            })
            .collect(),
    )
}

/// Computes one resampled overlay per period.
///
/// Periods longer than the daily history produce no moving average and are
/// left out rather than drawn empty.
pub fn overlays<P: PricePoint>(
    reference: &[NaiveDate],
    daily: &[P],
    periods: &[NonZeroUsize],
) -> Vec<MaOverlay> {
    periods
        .iter()
        .filter_map(|&period| {
            let ma = moving_average(daily, period);
            map_to_reference(reference, &ma).map(|points| MaOverlay {
                period: period.get(),
                points,
            })
        })
        .collect()
}
