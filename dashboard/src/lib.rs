//! Assembles the dashboard's chart data from the series analytics and the
//! keyword layout engine.

pub mod config;
pub mod input;
pub mod logging;
pub mod views;
