//! Reporting utilities: text rendering of estimates, tables, KPIs and charts.

pub mod format;

pub use format::*;
