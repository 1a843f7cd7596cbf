mod cli;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::progress::CliReporter;
use cli::Cli;
use colored::*;
use date_sorter::{AppConfig, Organizer};
use dotenv::dotenv;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Cli::parse();

    let _guard = logging::init_logger();

    let config = match date_sorter::config::load_configuration() {
        Ok(config) => config.with_overrides(args.date_format.clone(), args.ignore_duplicates),
        Err(err) => {
            error!("Error loading configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if args.print_config {
        println!("Configuration: {:?}", config);
        return ExitCode::SUCCESS;
    }

    let (Some(source), Some(destination)) = (args.source.as_deref(), args.destination.as_deref())
    else {
        error!("Both source and destination are required");
        return ExitCode::FAILURE;
    };

    match run_organize(source, destination, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_organize(source: &Path, destination: &Path, config: AppConfig) -> anyhow::Result<()> {
    let organizer = Organizer::new(source, destination, config);
    let reporter = CliReporter::new();
    let report = organizer
        .run(&reporter)
        .with_context(|| format!("Unable to organize {}", source.display()))?;

    info!(
        "{} copied, {} duplicates skipped, {} errors",
        report.copied(),
        report.skipped(),
        report.failed(),
    );
    println!(
        "{} copied, {} duplicates skipped, {} errors",
        format!("{}", report.copied()).green(),
        format!("{}", report.skipped()).yellow(),
        format!("{}", report.failed()).red(),
    );

    Ok(())
}
