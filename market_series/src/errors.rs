use thiserror::Error;

/// The unified error type for the `market_series` crate.
///
/// The transforms themselves never fail on short or empty input; errors only
/// come from configuration and from the bar-source boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A bar source could not deliver data (network, file, decoding...).
    #[error("Bar source error: {0}")]
    Source(String),

    /// The bar source has no history for the requested symbol.
    #[error("No bars available for symbol {0}")]
    UnknownSymbol(String),

    /// A configuration value is out of range.
    #[error("Configuration error: {0}")]
    Config(String),
}
