pub mod bar;
pub mod bar_series;
pub mod point;
pub mod week;
