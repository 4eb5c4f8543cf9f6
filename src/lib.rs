//! `ecay-tracker` library crate.
//!
//! The binary (`ecay`) is a thin wrapper around this library so that:
//!
//! - the estimator and catalog code are testable without spawning processes
//! - the CLI and the dashboard share one catalog loader

pub mod app;
pub mod catalog;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod report;
pub mod tui;
