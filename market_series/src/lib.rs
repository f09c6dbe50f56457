//! Price-series analytics behind the dashboard's time-series, comparison and
//! ranking views.
//!
//! Everything in here is a pure transform over borrowed slices of bars:
//! weekly rollups ([`aggregate`]), moving averages and their resampling onto
//! coarser dates ([`moving_average`]), rebasing to 100 ([`normalize`]),
//! risk/return metrics and peer ranks ([`performance`]), peer correlation
//! ([`correlation`]) and the selected-range summary ([`selection`]).
//! Fetching bars is left to a [`providers::BarSource`] implementation.

pub mod aggregate;
pub mod config;
pub mod correlation;
pub mod errors;
pub mod models;
pub mod moving_average;
pub mod normalize;
pub mod performance;
pub mod providers;
pub mod selection;
