//! Step handlers
//!
//! One module per step. Each handler takes the already parsed request and
//! a [`PipelineApi`](spinnaker_client::PipelineApi), and returns the
//! response to write; the binaries own stdin/stdout and client setup.

pub mod check;
pub mod get;
pub mod put;

use spinnaker_core::dto::MetadataPair;

/// Metadata entries naming the application and pipeline
fn pipeline_metadata(application: &str, pipeline: &str) -> Vec<MetadataPair> {
    vec![
        MetadataPair::new("Application Name", application),
        MetadataPair::new("Pipeline Name", pipeline),
    ]
}
