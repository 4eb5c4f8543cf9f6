//! Command-line parsing for the ecaytrade vehicle dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimator and catalog code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_TARGET_YEAR, SortField, SortOrder};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ecay", version, about = "Vehicle marketplace analytics and fair-price estimator")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where to load the catalog from.
///
/// Precedence: `--catalog`, then `--feed`, then `ECAY_CATALOG`, then the bundled sample.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Catalog JSON file (see `ecay export-catalog`).
    #[arg(long, global = true, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Use the listings feed at `ECAY_API_URL` for comparables.
    #[arg(long, global = true)]
    pub feed: bool,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate a fair price for a vehicle.
    Estimate(EstimateArgs),
    /// List the makes in the catalog.
    Makes,
    /// List the models available for a make.
    Models(ModelsArgs),
    /// List the years available for a make and model (newest first).
    Years(YearsArgs),
    /// Print the listings table.
    Listings(ListingsArgs),
    /// Print the KPI summary.
    Kpis,
    /// Print chart series (body types, listing volume, price trend).
    Charts,
    /// Write the current catalog to a JSON file.
    ExportCatalog(ExportCatalogArgs),
    /// Launch the interactive dashboard (default).
    Tui,
}

#[derive(Debug, Clone, Parser)]
pub struct EstimateArgs {
    /// Vehicle make (exact match, e.g. "Toyota").
    #[arg(long)]
    pub make: String,

    /// Vehicle model (exact match). Omit to estimate from the whole make.
    #[arg(long, default_value = "")]
    pub model: String,

    /// Model year.
    #[arg(long, default_value_t = DEFAULT_TARGET_YEAR)]
    pub year: i32,

    /// Odometer reading, e.g. `15000` or `15,000 mi`.
    #[arg(long, allow_hyphen_values = true)]
    pub mileage: String,

    /// Print the estimate as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ModelsArgs {
    #[arg(long)]
    pub make: String,
}

#[derive(Debug, Clone, Parser)]
pub struct YearsArgs {
    #[arg(long)]
    pub make: String,

    #[arg(long)]
    pub model: String,
}

#[derive(Debug, Clone, Parser)]
pub struct ListingsArgs {
    /// Case-insensitive search over make, model and year.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only show this make.
    #[arg(long)]
    pub make: Option<String>,

    /// Sort column.
    #[arg(long, value_enum, default_value_t = SortField::Listed)]
    pub sort: SortField,

    /// Sort order.
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    pub order: SortOrder,

    /// Export the table rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct ExportCatalogArgs {
    /// Output JSON path.
    #[arg(long, value_name = "JSON")]
    pub out: PathBuf,
}
