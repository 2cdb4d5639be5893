//! Spinnaker Pipeline Resource
//!
//! The three steps of a pipeline-engine resource backed by a Spinnaker
//! pipeline:
//! - `check`: reports executions of the pipeline as versions
//! - `in`: fetches one execution's metadata into a directory
//! - `out`: triggers an execution and optionally waits for a target status
//!
//! Architecture:
//! - Envelope: JSON request on stdin, JSON response on stdout
//! - Configuration: source validation and poll timing
//! - Commands: one handler per step, talking to Spinnaker only through
//!   [`spinnaker_client::PipelineApi`]
//! - Poller: waits for a triggered execution to settle

pub mod commands;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod payload;
pub mod poller;

pub use error::{ResourceError, Result};
