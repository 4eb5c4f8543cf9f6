//! Fair-price estimation.
//!
//! The estimator is a small pure function so both front-ends (CLI and TUI)
//! can call it directly on whatever catalog they hold.

pub mod fair_price;

pub use fair_price::*;
