//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging for the text commands
//! - loads the catalog (sample, file, or feed)
//! - runs the requested command and prints its report

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::catalog::{Catalog, ListingQuery, parse_mileage_input};
use crate::cli::{Command, EstimateArgs, ExportCatalogArgs, ListingsArgs, ModelsArgs, YearsArgs};
use crate::domain::Estimation;
use crate::error::AppError;
use crate::report::EstimateTarget;

pub mod pipeline;

/// Entry point for the `ecay` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    let command = match cli.command {
        // The dashboard owns the terminal, so it runs without a log subscriber.
        None | Some(Command::Tui) => return crate::tui::run(&cli.source),
        Some(command) => command,
    };

    init_logging();
    let catalog = pipeline::load_catalog(&cli.source)?;
    info!(source = %catalog.source.label(), "catalog ready");

    let output = run_command(&catalog, command)?;
    print!("{output}");
    Ok(())
}

/// Warnings and errors by default; `RUST_LOG` overrides.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run a non-interactive command and return its printable output.
pub fn run_command(catalog: &Catalog, command: Command) -> Result<String, AppError> {
    match command {
        Command::Estimate(args) => handle_estimate(catalog, &args),
        Command::Makes => Ok(lines(catalog.makes())),
        Command::Models(ModelsArgs { make }) => Ok(lines(catalog.models(&make))),
        Command::Years(YearsArgs { make, model }) => Ok(lines(catalog.years(&make, &model))),
        Command::Listings(args) => handle_listings(catalog, args),
        Command::Kpis => Ok(crate::report::format_kpis(&crate::catalog::kpi_summary(
            &catalog.listings,
        ))),
        Command::Charts => Ok(crate::report::format_charts(
            &crate::catalog::body_type_distribution(&catalog.listings),
            &crate::catalog::listing_volume_by_month(&catalog.listings),
            &crate::data::sample_price_trends(),
        )),
        Command::ExportCatalog(ExportCatalogArgs { out }) => {
            crate::io::write_catalog_json(&out, catalog)?;
            Ok(format!("Wrote {}\n", out.display()))
        }
        Command::Tui => Err(AppError::input("The dashboard is not a text command.")),
    }
}

#[derive(Debug, Serialize)]
struct EstimateOutput<'a> {
    make: &'a str,
    model: &'a str,
    year: i32,
    mileage: f64,
    estimation: Option<&'a Estimation>,
}

fn handle_estimate(catalog: &Catalog, args: &EstimateArgs) -> Result<String, AppError> {
    let make = args.make.trim();
    if make.is_empty() {
        return Err(AppError::input("Make is required."));
    }
    let model = args.model.trim();
    let mileage = parse_mileage_input(&args.mileage)?;

    let estimation = crate::estimate::estimate(&catalog.records, make, model, args.year, mileage);
    debug!(make, model, year = args.year, mileage, found = estimation.is_some(), "estimate");

    if args.json {
        let output = EstimateOutput {
            make,
            model,
            year: args.year,
            mileage,
            estimation: estimation.as_ref(),
        };
        let mut json = serde_json::to_string_pretty(&output)
            .map_err(|e| AppError::runtime(format!("Failed to serialize estimate: {e}")))?;
        json.push('\n');
        return Ok(json);
    }

    let target = EstimateTarget {
        make,
        model,
        year: args.year,
        mileage,
    };
    Ok(crate::report::format_estimation(&target, estimation.as_ref()))
}

fn handle_listings(catalog: &Catalog, args: ListingsArgs) -> Result<String, AppError> {
    let query = ListingQuery {
        search: args.search,
        make: args.make,
        sort_field: args.sort,
        sort_order: args.order,
    };
    let rows = query.apply(&catalog.listings);

    if let Some(path) = &args.export {
        crate::io::write_listings_csv(path, &rows)?;
        info!(path = %path.display(), rows = rows.len(), "exported listings");
    }

    Ok(crate::report::format_listings_table(&rows))
}

fn lines<T: std::fmt::Display>(items: Vec<T>) -> String {
    items.iter().map(|i| format!("{i}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use crate::data::sample_listings;

    fn sample() -> Catalog {
        Catalog::from_listings(CatalogSource::Sample, sample_listings())
    }

    fn estimate_args(make: &str, model: &str, mileage: &str) -> EstimateArgs {
        EstimateArgs {
            make: make.to_string(),
            model: model.to_string(),
            year: 2022,
            mileage: mileage.to_string(),
            json: false,
        }
    }

    #[test]
    fn estimate_command_prints_report() {
        let out = run_command(&sample(), Command::Estimate(estimate_args("Toyota", "Camry", "15,000"))).unwrap();
        assert!(out.contains("Confidence:           Medium"));
        assert!(out.contains("Based on 5 comparable listings"));
    }

    #[test]
    fn unknown_make_is_not_an_error() {
        let out = run_command(&sample(), Command::Estimate(estimate_args("Ferrari", "", "100"))).unwrap();
        assert!(out.contains("Insufficient data for make 'Ferrari'."));
    }

    #[test]
    fn estimate_rejects_bad_input() {
        let err = run_command(&sample(), Command::Estimate(estimate_args("Toyota", "Camry", "lots"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = run_command(&sample(), Command::Estimate(estimate_args("  ", "Camry", "100"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn estimate_json_output() {
        let mut args = estimate_args("Ferrari", "", "100");
        args.json = true;
        let out = run_command(&sample(), Command::Estimate(args)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["estimation"].is_null());
        assert_eq!(value["make"], "Ferrari");
    }

    #[test]
    fn cascading_selection_commands() {
        let catalog = sample();
        let models = run_command(&catalog, Command::Models(ModelsArgs { make: "Honda".to_string() })).unwrap();
        assert_eq!(models, "Accord\nCR-V\nCivic\n");
        let years = run_command(
            &catalog,
            Command::Years(YearsArgs {
                make: "Honda".to_string(),
                model: "Civic".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(years, "2023\n");
    }
}
