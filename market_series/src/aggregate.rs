//! Weekly OHLCV rollup of daily bars.

use tracing::debug;

use crate::models::{
    bar::{DailyBar, WeeklyBar},
    week::{WeekKey, WeekStart},
};

/// Running OHLCV state of the week currently being filled.
struct WeekAccumulator {
    key: WeekKey,
    bar: WeeklyBar,
}

impl WeekAccumulator {
    fn open(key: WeekKey, day: &DailyBar) -> Self {
        Self {
            key,
            bar: WeeklyBar {
                date: day.date,
                open: day.open,
                high: day.high,
                low: day.low,
                close: day.close,
                volume: day.volume,
            },
        }
    }

    fn absorb(&mut self, day: &DailyBar) {
        self.bar.date = day.date;
        self.bar.high = self.bar.high.max(day.high);
        self.bar.low = self.bar.low.min(day.low);
        self.bar.close = day.close;
        self.bar.volume += day.volume;
    }
}

/// Rolls daily bars up into Sunday-based weeks.
///
/// See [`aggregate_to_weekly_with`] for the grouping rules.
pub fn aggregate_to_weekly(daily: &[DailyBar]) -> Vec<WeeklyBar> {
    aggregate_to_weekly_with(daily, WeekStart::Sunday)
}

/// Rolls daily bars up into weeks starting on `week_start`.
///
/// - Input is stably sorted by date first; it need not arrive ordered.
/// - A new week starts whenever the `(year, week-of-year)` key of a bar differs
///   from the previous bar's key. Gaps inside a week do not split it.
/// - open = first open, high = max high, low = min low, close = last close,
///   volume = sum, date = last trading day of the group.
/// - The trailing partial week is always emitted.
///
/// Empty input yields an empty vector.
pub fn aggregate_to_weekly_with(daily: &[DailyBar], week_start: WeekStart) -> Vec<WeeklyBar> {
    if daily.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&DailyBar> = daily.iter().collect();
    sorted.sort_by_key(|b| b.date);

    let mut weekly = Vec::new();
    let mut current: Option<WeekAccumulator> = None;

    for day in sorted {
        let key = week_start.week_key(day.date);
        match current.as_mut() {
            Some(acc) if acc.key == key => acc.absorb(day),
            _ => {
                if let Some(done) = current.replace(WeekAccumulator::open(key, day)) {
                    weekly.push(done.bar);
                }
            }
        }
    }
    if let Some(done) = current {
        weekly.push(done.bar);
    }

    debug!(days = daily.len(), weeks = weekly.len(), "aggregated daily bars");
    weekly
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32, open: f64, high: f64, low: f64, close: f64, volume: f64) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open,
            high,
            low,
            close,
            volume,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(aggregate_to_weekly(&[]).is_empty());
    }

    #[test]
    fn rolls_up_one_week() {
        // Mon 2017-01-02 .. Fri 2017-01-06
        let days = vec![
            day(2017, 1, 2, 10.0, 12.0, 9.0, 11.0, 100.0),
            day(2017, 1, 3, 11.0, 15.0, 10.0, 14.0, 200.0),
            day(2017, 1, 4, 14.0, 14.5, 8.0, 9.5, 300.0),
            day(2017, 1, 6, 9.5, 10.0, 9.0, 9.8, 400.0),
        ];
        let weeks = aggregate_to_weekly(&days);
        assert_eq!(weeks.len(), 1);
        let w = &weeks[0];
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2017, 1, 6).unwrap());
        assert_eq!(w.open, 10.0);
        assert_eq!(w.high, 15.0);
        assert_eq!(w.low, 8.0);
        assert_eq!(w.close, 9.8);
        assert_eq!(w.volume, 1000.0);
    }

    #[test]
    fn unsorted_input_is_sorted_before_grouping() {
        let days = vec![
            day(2017, 1, 10, 3.0, 3.0, 3.0, 3.0, 1.0),
            day(2017, 1, 2, 1.0, 1.0, 1.0, 1.0, 1.0),
            day(2017, 1, 9, 2.0, 2.0, 2.0, 2.0, 1.0),
            day(2017, 1, 3, 1.5, 1.5, 1.5, 1.5, 1.0),
        ];
        let weeks = aggregate_to_weekly(&days);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].open, 1.0);
        assert_eq!(weeks[0].close, 1.5);
        assert_eq!(weeks[1].open, 2.0);
        assert_eq!(weeks[1].close, 3.0);
        assert!(weeks[0].date < weeks[1].date);
    }

    #[test]
    fn trailing_partial_week_is_flushed() {
        let days = vec![
            day(2017, 1, 6, 1.0, 1.0, 1.0, 1.0, 5.0),
            // Monday of the following week, stream ends here
            day(2017, 1, 9, 2.0, 2.0, 2.0, 2.0, 7.0),
        ];
        let weeks = aggregate_to_weekly(&days);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1].volume, 7.0);
    }

    #[test]
    fn monday_weeks_absorb_sunday_bars() {
        let days = vec![
            day(2017, 1, 6, 1.0, 1.0, 1.0, 1.0, 1.0),
            day(2017, 1, 8, 2.0, 2.0, 2.0, 2.0, 1.0),
        ];
        assert_eq!(aggregate_to_weekly_with(&days, WeekStart::Sunday).len(), 2);
        assert_eq!(aggregate_to_weekly_with(&days, WeekStart::Monday).len(), 1);
    }
}
