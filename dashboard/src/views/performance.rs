//! The "stock information" panel: risk/return metrics of one ticker, its
//! rank among every ticker the source knows, the benchmark's own figures
//! and the most and least correlated peers.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use market_series::{
    config::SeriesConfig,
    correlation::{CorrelationFilter, CorrelationSummary, rank_correlations},
    models::bar::DailyBar,
    performance::{MetricRanks, PerformanceMetrics, performance_metrics, rank, total_return},
    providers::BarSource,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceView {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_return: f64,
    pub metrics: PerformanceMetrics,
    pub ranks: MetricRanks,
    /// The benchmark's figures: alpha 0 and beta 1 by definition, Sharpe and
    /// Treynor as evaluated (0 when the benchmark has no data).
    pub market: PerformanceMetrics,
    pub correlation: CorrelationSummary,
    /// Tickers ranked, the requested one included.
    pub tickers_evaluated: usize,
}

pub async fn performance_view(
    source: &dyn BarSource,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
    cfg: &SeriesConfig,
) -> Result<PerformanceView> {
    let stock = source
        .fetch_daily(ticker, start, end)
        .await
        .with_context(|| format!("fetching bars for {ticker}"))?;
    let market = source
        .fetch_daily(&cfg.benchmark, start, end)
        .await
        .with_context(|| format!("fetching benchmark {}", cfg.benchmark))?;
    let stock_return = total_return(&stock.bars)
        .with_context(|| format!("no bars for {ticker} between {start} and {end}"))?;
    let market_return = total_return(&market.bars)
        .with_context(|| format!("no bars for {} between {start} and {end}", cfg.benchmark))?;

    let rf = cfg.risk_free_rate;
    let metrics = performance_metrics(stock_return, market_return, &stock.bars, &market.bars, rf);

    let mut all: IndexMap<String, PerformanceMetrics> = IndexMap::new();
    let mut universe: IndexMap<String, Vec<DailyBar>> = IndexMap::new();
    for peer in source.symbols() {
        if peer == ticker {
            continue;
        }
        let bars = match source.fetch_daily(&peer, start, end).await {
            Ok(series) => series.bars,
            Err(err) => {
                warn!(%peer, %err, "Skipping peer");
                continue;
            }
        };
        let Some(peer_return) = total_return(&bars) else {
            debug!(%peer, "Skipping peer without bars in range");
            continue;
        };
        let peer_metrics = performance_metrics(peer_return, market_return, &bars, &market.bars, rf);
        all.insert(peer.clone(), peer_metrics);
        universe.insert(peer, bars);
    }
    all.insert(ticker.to_string(), metrics);
    let ranks = rank(ticker, &all);

    let benchmark = all.get(&cfg.benchmark);
    let market_metrics = PerformanceMetrics {
        alpha: 0.0,
        beta: 1.0,
        sharpe_ratio: benchmark.map_or(0.0, |m| m.sharpe_ratio),
        treynor_ratio: benchmark.map_or(0.0, |m| m.treynor_ratio),
    };

    universe.insert(ticker.to_string(), stock.bars.clone());
    let filter = CorrelationFilter {
        benchmark: &cfg.benchmark,
        min_aligned: cfg.min_aligned_returns,
    };
    let correlation = rank_correlations(ticker, &stock.bars, &universe, &filter);

    info!(ticker, tickers = all.len(), "Built performance view");
    Ok(PerformanceView {
        ticker: ticker.to_string(),
        start,
        end,
        total_return: stock_return,
        metrics,
        ranks,
        market: market_metrics,
        correlation,
        tickers_evaluated: all.len(),
    })
}
