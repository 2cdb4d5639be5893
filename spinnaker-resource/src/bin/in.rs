//! `in` binary: fetches one execution into a destination directory

use anyhow::Result;
use clap::Parser;
use spinnaker_client::SpinnakerClient;
use spinnaker_core::dto::get::InRequest;
use spinnaker_resource::commands::get::get;
use spinnaker_resource::config::validate_source;
use spinnaker_resource::envelope::{self, Step};
use spinnaker_resource::logging;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "in")]
#[command(about = "Fetch a Spinnaker pipeline execution", long_about = None)]
struct Cli {
    /// Directory to write metadata.json and version into
    destination: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            envelope::report_failure(Step::Get, &e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli: Cli = envelope::parse_args()?;

    let request: InRequest = envelope::read_request(io::stdin().lock())?;
    validate_source(&request.source)?;

    let client = SpinnakerClient::connect(&request.source).await?;
    let response = get(&client, &request, &cli.destination).await?;

    envelope::write_response(io::stdout().lock(), &response)?;
    Ok(())
}
