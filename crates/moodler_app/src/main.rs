mod cli;
mod config;
mod logging;
mod report;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use engine_logging::engine_info;
use moodler_core::{RunSummary, ScrapeConfig};
use moodler_engine::{FetchSettings, ReqwestClient, Scraper};

use crate::cli::Cli;
use crate::report::ConsoleReporter;
use crate::settings::SetupError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.verbose, cli.log_file.as_deref());

    let config = match settings::resolve(&cli) {
        Ok(config) => config,
        Err(SetupError::Usage(message)) => {
            Cli::command()
                .error(ErrorKind::MissingRequiredArgument, message)
                .exit();
        }
        Err(err) => {
            engine_info!("Setup failed: {}", err);
            report::fatal(&err);
            return ExitCode::FAILURE;
        }
    };
    engine_info!(
        "Scraping {} from {} into {:?} with credential {:?}",
        config.target(),
        config.site().base_url(),
        config.output_root(),
        config.credential()
    );

    match run(&config) {
        Ok(summary) => {
            report::summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            engine_info!("Run failed: {:#}", err);
            // Close the pending "... " progress line.
            println!();
            report::fatal(format_args!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ScrapeConfig) -> anyhow::Result<RunSummary> {
    let client = ReqwestClient::new(config.credential(), FetchSettings::default())
        .context("failed to set up the HTTP client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let reporter = ConsoleReporter;
    let scraper = Scraper::new(&client, config.site(), config.output_root(), &reporter);
    let summary = runtime.block_on(scraper.run(config.target()))?;
    Ok(summary)
}
