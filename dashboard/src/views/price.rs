use anyhow::{Context, Result};
use chrono::NaiveDate;
use market_series::{
    aggregate::aggregate_to_weekly_with,
    config::SeriesConfig,
    errors::Error,
    models::{bar::WeeklyBar, bar_series::BarSeries},
    moving_average::{MaOverlay, overlays},
    providers::BarSource,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Weekly candles for the display window with moving-average overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceView {
    pub symbol: String,
    pub weekly: Vec<WeeklyBar>,
    pub overlays: Vec<MaOverlay>,
}

/// Weekly bars inside the display window.
///
/// Aggregation starts `warmup_days` before the window so the first
/// displayed week is built from all of its days.
pub fn display_weekly(series: &BarSeries, cfg: &SeriesConfig) -> Vec<WeeklyBar> {
    let display = &cfg.display;
    let calc = series.between(display.calculation_start(), display.end);
    aggregate_to_weekly_with(&calc, cfg.week_start)
        .into_iter()
        .filter(|w| display.contains(w.date))
        .collect()
}

/// Builds the price panel from a symbol's daily history.
///
/// The averages are taken over the displayed daily closes only and snapped
/// onto the weekly dates.
pub fn build_price_view(series: &BarSeries, cfg: &SeriesConfig) -> Result<PriceView, Error> {
    let periods = cfg.periods()?;
    let weekly = display_weekly(series, cfg);
    if weekly.is_empty() {
        warn!(symbol = %series.symbol, "No weekly bars in the display window");
        return Ok(PriceView {
            symbol: series.symbol.clone(),
            weekly,
            overlays: Vec::new(),
        });
    }

    let daily = series.between(cfg.display.start, cfg.display.end);
    let dates: Vec<NaiveDate> = weekly.iter().map(|w| w.date).collect();
    let overlays = overlays(&dates, &daily, &periods);
    debug!(
        symbol = %series.symbol,
        weeks = weekly.len(),
        overlays = overlays.len(),
        "Built price view"
    );
    Ok(PriceView {
        symbol: series.symbol.clone(),
        weekly,
        overlays,
    })
}

pub async fn price_view(source: &dyn BarSource, symbol: &str, cfg: &SeriesConfig) -> Result<PriceView> {
    let series = source
        .fetch_daily(symbol, cfg.display.calculation_start(), cfg.display.end)
        .await
        .with_context(|| format!("fetching bars for {symbol}"))?;
    Ok(build_price_view(&series, cfg)?)
}
