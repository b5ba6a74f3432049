//! Boatyard CLI entrypoint for browsing the boat catalogue.

use std::io::{self, Write};
use std::process::ExitCode;

use boatyard::{BoatyardConfig, CatalogError, OperationMode};
use ortho_config::OrthoConfig;

mod cli;

use cli::ModeOutcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(ModeOutcome::Completed) => ExitCode::SUCCESS,
        Ok(ModeOutcome::FailureShown) => ExitCode::FAILURE,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ModeOutcome, CatalogError> {
    let config = load_config()?;
    cli::logging::init(&config.log_level)?;

    let services = cli::Services::from_config(&config)?;
    match config.operation_mode() {
        OperationMode::Reviews => cli::reviews::run(&config, &services).await,
        OperationMode::NearMe => cli::near_me::run(&config, &services).await,
        OperationMode::Search => cli::search::run(&config, &services).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<BoatyardConfig, CatalogError> {
    BoatyardConfig::load().map_err(|error| CatalogError::Configuration {
        message: error.to_string(),
    })
}
