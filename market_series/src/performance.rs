//! Risk/return metrics of a ticker against the market benchmark, and the
//! ticker's standing among its peers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::point::PricePoint;

/// Trading days per year, used to scale the risk-free rate and volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub alpha: f64,
    pub beta: f64,
    pub sharpe_ratio: f64,
    pub treynor_ratio: f64,
}

/// 1-based descending rank of a ticker for each metric; 0 when the ticker was
/// not evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRanks {
    pub alpha: usize,
    pub beta: usize,
    pub sharpe_ratio: usize,
    pub treynor_ratio: usize,
}

/// `last / first - 1` over the closes, or `None` for an empty series.
pub fn total_return<P: PricePoint>(series: &[P]) -> Option<f64> {
    let first = series.first()?.close();
    let last = series.last()?.close();
    Some(last / first - 1.0)
}

/// Day-over-day fractional change of the closes; one shorter than the input.
pub fn daily_returns<P: PricePoint>(series: &[P]) -> Vec<f64> {
    series
        .windows(2)
        .map(|pair| pair[1].close() / pair[0].close() - 1.0)
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`).
fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Sample covariance (divides by `n - 1`). Both slices must have the same
/// length, at least 2.
fn sample_covariance(xs: &[f64], ys: &[f64]) -> f64 {
    let (mx, my) = (mean(xs), mean(ys));
    let sum: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    sum / (xs.len() - 1) as f64
}

/// Beta of `stock` against `market` over their common prefix.
///
/// The covariance is the sample estimate and the variance the population
/// estimate. Falls back to 1 with fewer than two paired returns or a flat
/// market.
pub fn beta(stock: &[f64], market: &[f64]) -> f64 {
    let n = stock.len().min(market.len());
    if n <= 1 {
        return 1.0;
    }
    let (stock, market) = (&stock[..n], &market[..n]);
    let var = population_variance(market);
    if var == 0.0 || !var.is_finite() {
        return 1.0;
    }
    sample_covariance(stock, market) / var
}

/// Alpha, beta, Sharpe and Treynor for one ticker over the loaded period.
///
/// `stock_return` and `market_return` are the period total returns; the bars
/// supply the daily returns for beta and volatility. The annual
/// `risk_free_rate` is scaled to the period by its length in trading days.
pub fn performance_metrics<P: PricePoint, M: PricePoint>(
    stock_return: f64,
    market_return: f64,
    stock: &[P],
    market: &[M],
    risk_free_rate: f64,
) -> PerformanceMetrics {
    let period_days = stock.len().max(1) as f64;
    let period_rf = risk_free_rate * period_days / TRADING_DAYS_PER_YEAR;
    let excess = stock_return - period_rf;

    let stock_daily = daily_returns(stock);
    let market_daily = daily_returns(market);
    let paired = stock_daily.len().min(market_daily.len());

    let beta = beta(&stock_daily, &market_daily);
    let alpha = stock_return - (period_rf + beta * (market_return - period_rf));

    let sharpe_ratio = if paired > 1 {
        let volatility = population_variance(&stock_daily).sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
        if volatility != 0.0 { excess / volatility } else { 0.0 }
    } else if period_rf != 0.0 {
        excess / period_rf
    } else {
        0.0
    };
    let treynor_ratio = if beta != 0.0 { excess / beta } else { 0.0 };

    debug!(period_days, paired, beta, alpha, "Computed performance metrics");
    PerformanceMetrics {
        alpha,
        beta,
        sharpe_ratio,
        treynor_ratio,
    }
}

/// Position of `ticker` when the tickers are sorted by `metric` descending.
/// Equal values keep insertion order.
fn rank_by(
    ticker: &str,
    all: &IndexMap<String, PerformanceMetrics>,
    metric: fn(&PerformanceMetrics) -> f64,
) -> usize {
    let Some((index, _, own)) = all.get_full(ticker) else {
        return 0;
    };
    let own = metric(own);
    let ahead = all
        .values()
        .enumerate()
        .filter(|&(i, m)| {
            let v = metric(m);
            v > own || (v == own && i < index)
        })
        .count();
    ahead + 1
}

/// Ranks of `ticker` among every evaluated ticker in `all` (itself included).
pub fn rank(ticker: &str, all: &IndexMap<String, PerformanceMetrics>) -> MetricRanks {
    MetricRanks {
        alpha: rank_by(ticker, all, |m| m.alpha),
        beta: rank_by(ticker, all, |m| m.beta),
        sharpe_ratio: rank_by(ticker, all, |m| m.sharpe_ratio),
        treynor_ratio: rank_by(ticker, all, |m| m.treynor_ratio),
    }
}
