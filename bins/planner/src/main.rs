//! Capacity planner CLI
//!
//! Loads the budget and personnel collections from the data directory and
//! prints capacity reports, projections, and exports.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planner_shared::{AppConfig, AppError};

mod cli;
mod commands;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => return fail(cli.json, &AppError::from(err)),
    };

    // Initialize tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(
            (!config.log.json)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .with(
            config
                .log
                .json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .init();

    match commands::run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(cli.json, &err),
    }
}

fn fail(json: bool, err: &AppError) -> ExitCode {
    output::print_error(json, err);
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
