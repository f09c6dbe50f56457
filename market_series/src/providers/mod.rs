//! Source abstraction for daily bars.
//!
//! The analytics never fetch anything themselves. Whatever loads the bars
//! (HTTP back-end, local CSV/JSON files, a test fixture) implements
//! [`BarSource`] and the caller hands the resulting slices to the engines.
//!
//! The trait is async and object safe, so a source can be picked at runtime
//! behind `Box<dyn BarSource>`.

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::{errors::Error, models::bar_series::BarSeries};

#[async_trait]
pub trait BarSource: Send + Sync {
    /// Daily bars of `symbol` dated within `[start, end]`, ascending.
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, Error>;

    /// Symbols this source can serve, used to build the peer universe.
    fn symbols(&self) -> Vec<String>;
}

/// A [`BarSource`] over series already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    series: IndexMap<String, BarSeries>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the history of `series.symbol`.
    pub fn insert(&mut self, series: BarSeries) {
        self.series.insert(series.symbol.clone(), series);
    }
}

impl FromIterator<BarSeries> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = BarSeries>>(iter: I) -> Self {
        let mut source = Self::new();
        for series in iter {
            source.insert(series);
        }
        source
    }
}

#[async_trait]
impl BarSource for InMemorySource {
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, Error> {
        let series = self
            .series
            .get(symbol)
            .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))?;
        let bars = series.between(start, end);
        debug!(symbol, %start, %end, bars = bars.len(), "Served bars from memory");
        Ok(BarSeries::new(symbol, bars))
    }

    fn symbols(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bar::DailyBar;

    fn bar(day: u32, close: f64) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2019, 4, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000.0,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    fn source() -> Box<dyn BarSource> {
        let series = BarSeries::new("AAPL", vec![bar(3, 3.0), bar(1, 1.0), bar(2, 2.0)]);
        Box::new(InMemorySource::from_iter([series]))
    }

    #[tokio::test]
    async fn filters_to_the_requested_range() {
        let src = source();
        let d = |day| NaiveDate::from_ymd_opt(2019, 4, day).unwrap();
        let got = src.fetch_daily("AAPL", d(2), d(3)).await.unwrap();
        let closes: Vec<f64> = got.bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![2.0, 3.0]);
        assert_eq!(src.symbols(), vec!["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn unknown_symbol_is_an_error() {
        let d = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap();
        let err = source().fetch_daily("ZZZ", d, d).await.unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol(ref s) if s == "ZZZ"));
    }
}
