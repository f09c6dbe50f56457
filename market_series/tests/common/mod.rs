#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use market_series::models::bar::DailyBar;
use proptest::prelude::*;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn flat_bar(date: NaiveDate, close: f64, volume: f64) -> DailyBar {
    DailyBar {
        date,
        open: close,
        high: close,
        low: close,
        close,
        volume,
        dividends: 0.0,
        stock_splits: 0.0,
    }
}

/// Weekday bars starting at `start`, with closes taken from `closes`.
pub fn weekday_bars(start: NaiveDate, closes: &[f64]) -> Vec<DailyBar> {
    use chrono::{Datelike, Weekday};
    start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .zip(closes)
        .map(|(d, &c)| flat_bar(d, c, 100.0))
        .collect()
}

/// Random bars on distinct days, with consistent OHLC and gaps of up to ten
/// days, spanning the 2019/2020 year boundary.
pub fn arb_daily_bars(max_len: usize) -> impl Strategy<Value = Vec<DailyBar>> {
    prop::collection::vec(
        (1u64..10, 1.0f64..500.0, 0.0f64..0.2, 0.0f64..0.2, 0.0f64..1.0, 0u32..1_000_000),
        0..max_len,
    )
    .prop_map(|rows| {
        let mut day = date(2019, 11, 1);
        rows.into_iter()
            .map(|(gap, base, up, down, mix, volume)| {
                day = day + Days::new(gap);
                let high = base * (1.0 + up);
                let low = base * (1.0 - down);
                let open = low + (high - low) * mix;
                let close = low + (high - low) * (1.0 - mix);
                DailyBar {
                    date: day,
                    open,
                    high,
                    low,
                    close,
                    volume: f64::from(volume),
                    dividends: 0.0,
                    stock_splits: 0.0,
                }
            })
            .collect()
    })
}
