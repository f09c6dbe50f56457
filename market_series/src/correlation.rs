//! Which peer moves most and least like the selected ticker.
//!
//! Returns are compared day by day: each series is turned into dated daily
//! returns and only dates present in both are paired.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::models::point::PricePoint;

/// A peer ticker and its correlation with the selected one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerCorrelation {
    pub ticker: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub most_correlated: Option<PeerCorrelation>,
    pub least_correlated: Option<PeerCorrelation>,
}

/// Rules for which peers take part in the ranking.
#[derive(Debug, Clone)]
pub struct CorrelationFilter<'a> {
    /// Market benchmark, never reported as a peer.
    pub benchmark: &'a str,
    /// Peers with fewer date-aligned returns are skipped.
    pub min_aligned: usize,
}

impl Default for CorrelationFilter<'_> {
    fn default() -> Self {
        Self {
            benchmark: "SPY",
            min_aligned: 5,
        }
    }
}

/// Daily returns keyed by the later day of each pair.
pub fn dated_returns<P: PricePoint>(series: &[P]) -> IndexMap<NaiveDate, f64> {
    series
        .windows(2)
        .map(|pair| (pair[1].date(), pair[1].close() / pair[0].close() - 1.0))
        .collect()
}

/// Pairs of returns on the dates both series share, in `left`'s order.
pub fn align(
    left: &IndexMap<NaiveDate, f64>,
    right: &IndexMap<NaiveDate, f64>,
) -> Vec<(f64, f64)> {
    left.iter()
        .filter_map(|(date, &l)| right.get(date).map(|&r| (l, r)))
        .collect()
}

/// Pearson correlation coefficient of the pairs.
///
/// NaN when either side has zero variance or there are fewer than two pairs.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    sxy / (sxx * syy).sqrt()
}

/// Most and least correlated peers of `ticker`.
///
/// `universe` maps every loaded ticker to its bars; the ticker itself, the
/// benchmark, empty series, peers with too few aligned returns and undefined
/// correlations are skipped. On equal correlations the first peer in
/// `universe` order wins.
pub fn rank_correlations<P: PricePoint>(
    ticker: &str,
    bars: &[P],
    universe: &IndexMap<String, Vec<P>>,
    filter: &CorrelationFilter<'_>,
) -> CorrelationSummary {
    if bars.is_empty() {
        return CorrelationSummary::default();
    }
    let own = dated_returns(bars);

    let mut summary = CorrelationSummary::default();
    for (peer, peer_bars) in universe {
        if peer == ticker || peer == filter.benchmark || peer_bars.is_empty() {
            continue;
        }
        let pairs = align(&own, &dated_returns(peer_bars));
        if pairs.len() < filter.min_aligned {
            trace!(%peer, aligned = pairs.len(), "Skipping peer with too few aligned returns");
            continue;
        }
        let correlation = pearson(&pairs);
        if correlation.is_nan() {
            continue;
        }

        let candidate = || PeerCorrelation {
            ticker: peer.clone(),
            correlation,
        };
        if summary
            .most_correlated
            .as_ref()
            .is_none_or(|best| correlation > best.correlation)
        {
            summary.most_correlated = Some(candidate());
        }
        if summary
            .least_correlated
            .as_ref()
            .is_none_or(|worst| correlation < worst.correlation)
        {
            summary.least_correlated = Some(candidate());
        }
    }

    debug!(
        ticker,
        most = ?summary.most_correlated.as_ref().map(|p| &p.ticker),
        least = ?summary.least_correlated.as_ref().map(|p| &p.ticker),
        "Ranked peer correlations"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::point::SeriesPoint;

    fn series(values: &[f64]) -> Vec<SeriesPoint> {
        let start = NaiveDate::from_ymd_opt(2020, 2, 3).unwrap();
        values
            .iter()
            .zip(start.iter_days())
            .map(|(&value, date)| SeriesPoint { date, value })
            .collect()
    }

    const BASE: [f64; 8] = [10.0, 11.0, 10.5, 12.0, 11.0, 11.5, 13.0, 12.5];

    #[test]
    fn scaled_copy_correlates_perfectly() {
        let pairs = align(
            &dated_returns(&series(&BASE)),
            &dated_returns(&series(&BASE.map(|v| v * 3.0))),
        );
        assert_eq!(pairs.len(), 7);
        assert!((pearson(&pairs) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn alignment_is_an_inner_join() {
        let left = dated_returns(&series(&BASE));
        let right: IndexMap<NaiveDate, f64> = left.iter().skip(3).map(|(d, r)| (*d, *r)).collect();
        assert_eq!(align(&left, &right).len(), 4);
    }

    #[test]
    fn picks_most_and_least_correlated() {
        let inverse = BASE.map(|v| 30.0 - v);
        let mut universe = IndexMap::new();
        universe.insert("AAPL".to_string(), series(&BASE));
        universe.insert("SPY".to_string(), series(&BASE));
        universe.insert("MSFT".to_string(), series(&BASE.map(|v| v * 2.0)));
        universe.insert("KO".to_string(), series(&inverse));
        universe.insert("NEW".to_string(), series(&BASE[..3]));
        universe.insert("EMPTY".to_string(), Vec::new());

        let summary = rank_correlations(
            "AAPL",
            &series(&BASE),
            &universe,
            &CorrelationFilter::default(),
        );
        let most = summary.most_correlated.unwrap();
        let least = summary.least_correlated.unwrap();
        assert_eq!(most.ticker, "MSFT");
        assert!((most.correlation - 1.0).abs() < 1e-12);
        assert_eq!(least.ticker, "KO");
        assert!(least.correlation < 0.0);
    }

    #[test]
    fn flat_peer_is_undefined_and_skipped() {
        let mut universe = IndexMap::new();
        universe.insert("FLAT".to_string(), series(&[5.0; 8]));
        let summary = rank_correlations(
            "AAPL",
            &series(&BASE),
            &universe,
            &CorrelationFilter::default(),
        );
        assert_eq!(summary, CorrelationSummary::default());
    }
}
