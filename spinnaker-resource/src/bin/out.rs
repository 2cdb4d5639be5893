//! `out` binary: triggers the pipeline

use anyhow::Result;
use clap::Parser;
use spinnaker_client::SpinnakerClient;
use spinnaker_core::dto::put::OutRequest;
use spinnaker_resource::commands::put::put;
use spinnaker_resource::config::validate_source;
use spinnaker_resource::envelope::{self, Step};
use spinnaker_resource::logging;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "out")]
#[command(about = "Trigger a Spinnaker pipeline execution", long_about = None)]
struct Cli {
    /// Directory that trigger parameter and artifact files are relative to
    sources: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            envelope::report_failure(Step::Put, &e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli: Cli = envelope::parse_args()?;

    let request: OutRequest = envelope::read_request(io::stdin().lock())?;
    validate_source(&request.source)?;

    let client = SpinnakerClient::connect(&request.source).await?;
    let response = put(&client, &request, &cli.sources).await?;

    envelope::write_response(io::stdout().lock(), &response)?;
    Ok(())
}
