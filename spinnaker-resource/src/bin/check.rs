//! `check` binary: emits new versions of the pipeline

use anyhow::Result;
use clap::Parser;
use spinnaker_client::SpinnakerClient;
use spinnaker_core::dto::check::CheckRequest;
use spinnaker_resource::commands::check::check;
use spinnaker_resource::config::validate_source;
use spinnaker_resource::envelope::{self, Step};
use spinnaker_resource::logging;
use std::io;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "check")]
#[command(about = "Report Spinnaker pipeline executions as versions", long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            envelope::report_failure(Step::Check, &e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let _cli: Cli = envelope::parse_args()?;

    let request: CheckRequest = envelope::read_request(io::stdin().lock())?;
    validate_source(&request.source)?;

    let client = SpinnakerClient::connect(&request.source).await?;
    let response = check(&client, &request).await?;

    envelope::write_response(io::stdout().lock(), &response)?;
    Ok(())
}
