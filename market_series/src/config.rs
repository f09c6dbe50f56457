//! Series-side configuration: moving-average periods, week convention,
//! display window and the performance constants.
//!
//! Every field has a default, so an empty TOML table is a valid
//! configuration.

use std::num::NonZeroUsize;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{errors::Error, models::week::WeekStart};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// The date range the price chart shows, plus how much earlier history is
/// loaded so the first displayed week is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayWindow {
    /// First displayed day (inclusive).
    pub start: NaiveDate,
    /// Last displayed day (inclusive).
    pub end: NaiveDate,
    /// Calendar days loaded before `start` for calculations.
    pub warmup_days: u64,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self {
            start: ymd(2017, 1, 1),
            end: ymd(2020, 7, 31),
            warmup_days: 90,
        }
    }
}

impl DisplayWindow {
    /// First day of the calculation range (`start - warmup_days`).
    pub fn calculation_start(&self) -> NaiveDate {
        self.start
            .checked_sub_days(Days::new(self.warmup_days))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesConfig {
    /// Moving-average window lengths, in trading days.
    pub moving_average_periods: Vec<usize>,
    pub week_start: WeekStart,
    pub display: DisplayWindow,
    /// Annual risk-free rate used by the performance metrics.
    pub risk_free_rate: f64,
    /// Market benchmark ticker; excluded from correlation ranking.
    pub benchmark: String,
    /// Minimum number of date-aligned returns for a correlation to count.
    pub min_aligned_returns: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            moving_average_periods: vec![7, 14, 30, 90],
            week_start: WeekStart::Sunday,
            display: DisplayWindow::default(),
            risk_free_rate: 0.02,
            benchmark: "SPY".to_string(),
            min_aligned_returns: 5,
        }
    }
}

impl SeriesConfig {
    /// Moving-average periods as non-zero window lengths.
    pub fn periods(&self) -> Result<Vec<NonZeroUsize>, Error> {
        self.moving_average_periods
            .iter()
            .map(|&p| {
                NonZeroUsize::new(p)
                    .ok_or_else(|| Error::Config("moving average period must be > 0".into()))
            })
            .collect()
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), Error> {
        self.periods()?;
        if self.display.start > self.display.end {
            return Err(Error::Config(format!(
                "display window starts after it ends ({} > {})",
                self.display.start, self.display.end
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(Error::Config("risk_free_rate must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let cfg = SeriesConfig::default();
        assert_eq!(cfg.moving_average_periods, vec![7, 14, 30, 90]);
        assert_eq!(cfg.week_start, WeekStart::Sunday);
        assert_eq!(cfg.display.calculation_start(), ymd(2016, 10, 3));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_period_is_rejected() {
        let cfg = SeriesConfig {
            moving_average_periods: vec![7, 0],
            ..SeriesConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut cfg = SeriesConfig::default();
        cfg.display.start = ymd(2021, 1, 1);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("starts after it ends"));
    }
}
