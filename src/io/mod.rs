//! Input/output helpers.
//!
//! - catalog JSON read/write (`catalog`)
//! - listings table CSV export (`export`)

pub mod catalog;
pub mod export;

pub use catalog::*;
pub use export::*;
