//! Spinnaker Resource Core
//!
//! Core types and logic shared by the Spinnaker client and the pipeline
//! resource steps.
//!
//! This crate contains:
//! - Domain types: pipeline executions, status sets, version references and
//!   the version reconciler used by the `check` step
//! - DTOs: the JSON envelopes exchanged with the pipeline engine and the
//!   wire types of the Spinnaker API

pub mod domain;
pub mod dto;
