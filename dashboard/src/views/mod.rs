//! Chart-ready data for each dashboard panel.
//!
//! Every view has a pure `build_*` function over already loaded bars and an
//! async wrapper that pulls what it needs from a
//! [`BarSource`](market_series::providers::BarSource).

pub mod bubbles;
pub mod comparison;
pub mod performance;
pub mod price;
