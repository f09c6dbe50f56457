//! Reading the JSON files the commands operate on.
//!
//! Bars come as one object keyed by ticker:
//!
//! ```json
//! { "AAPL": [{"date": "2019-01-02", "open": 38.7, "high": 39.7,
//!             "low": 38.6, "close": 39.5, "volume": 148158800}] }
//! ```
//!
//! Keywords use the sentiment service's `top_words` / `bottom_words` /
//! `adj_matrix` payload.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use keyword_layout::model::SentimentWords;
use market_series::{
    models::{bar::DailyBar, bar_series::BarSeries},
    providers::InMemorySource,
};
use tracing::info;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Parses a ticker-keyed bar file into a bar source.
pub fn parse_bars(text: &str) -> Result<InMemorySource> {
    let by_ticker: IndexMap<String, Vec<DailyBar>> =
        serde_json::from_str(text).context("decoding bar file")?;
    Ok(by_ticker
        .into_iter()
        .map(|(symbol, bars)| BarSeries::new(symbol, bars))
        .collect())
}

pub fn load_bars(path: &Path) -> Result<InMemorySource> {
    let source = parse_bars(&read(path)?).with_context(|| format!("in {}", path.display()))?;
    info!(path = %path.display(), "Loaded bar file");
    Ok(source)
}

pub fn load_words(path: &Path) -> Result<SentimentWords> {
    serde_json::from_str(&read(path)?)
        .with_context(|| format!("decoding keyword payload {}", path.display()))
}
