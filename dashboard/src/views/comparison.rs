use anyhow::{Context, Result};
use market_series::{
    config::SeriesConfig,
    models::{bar::WeeklyBar, bar_series::BarSeries, point::NormalizedPoint},
    normalize::normalize,
    providers::BarSource,
    selection::{RangeSummary, summarize},
};
use serde::{Deserialize, Serialize};

use super::price::display_weekly;

/// Two tickers rebased to 100 over the selected weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonView {
    pub symbol: String,
    pub peer: String,
    /// `None` when the main ticker has no weeks in the display window.
    pub selection: Option<RangeSummary>,
    pub main: Vec<NormalizedPoint>,
    pub peer_series: Vec<NormalizedPoint>,
}

/// Rebases the selected slice of `main`'s weeks and the peer's weeks that
/// fall between the slice's first and last dates.
pub fn build_comparison_view(
    main: &BarSeries,
    peer: &BarSeries,
    start_index: usize,
    end_index: usize,
    cfg: &SeriesConfig,
) -> ComparisonView {
    let main_weekly = display_weekly(main, cfg);
    let Some(selection) = summarize(&main_weekly, start_index, end_index) else {
        return ComparisonView {
            symbol: main.symbol.clone(),
            peer: peer.symbol.clone(),
            selection: None,
            main: Vec::new(),
            peer_series: Vec::new(),
        };
    };

    let slice = &main_weekly[selection.start_index..=selection.end_index];
    let peer_weekly: Vec<WeeklyBar> = display_weekly(peer, cfg)
        .into_iter()
        .filter(|w| w.date >= selection.start_date && w.date <= selection.end_date)
        .collect();

    ComparisonView {
        symbol: main.symbol.clone(),
        peer: peer.symbol.clone(),
        main: normalize(slice),
        peer_series: normalize(&peer_weekly),
        selection: Some(selection),
    }
}

pub async fn comparison_view(
    source: &dyn BarSource,
    symbol: &str,
    peer: &str,
    start_index: usize,
    end_index: usize,
    cfg: &SeriesConfig,
) -> Result<ComparisonView> {
    let (from, to) = (cfg.display.calculation_start(), cfg.display.end);
    let main = source
        .fetch_daily(symbol, from, to)
        .await
        .with_context(|| format!("fetching bars for {symbol}"))?;
    let other = source
        .fetch_daily(peer, from, to)
        .await
        .with_context(|| format!("fetching bars for {peer}"))?;
    Ok(build_comparison_view(&main, &other, start_index, end_index, cfg))
}
