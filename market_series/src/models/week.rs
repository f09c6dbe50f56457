//! Week-of-year keys used to group daily bars into weeks.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// `(calendar year, week-of-year)` of a trading day.
pub type WeekKey = (i32, u32);

/// Which weekday opens a new week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    /// US convention, the dashboard default.
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Week key of `date`.
    ///
    /// The week number counts week boundaries strictly after January 1 and on
    /// or before `date`, so January 1 is always in week 0 and the key never
    /// spans two calendar years.
    pub fn week_key(self, date: NaiveDate) -> WeekKey {
        let jan1 = NaiveDate::from_yo_opt(date.year(), 1).unwrap_or(date);
        let offset = match self {
            WeekStart::Sunday => jan1.weekday().num_days_from_sunday(),
            WeekStart::Monday => jan1.weekday().num_days_from_monday(),
        };
        (date.year(), (date.ordinal0() + offset) / 7)
    }
}
