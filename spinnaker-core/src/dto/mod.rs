//! Data Transfer Objects
//!
//! This module contains the JSON envelopes read from and written to the
//! pipeline engine by each step (`check`, `in`, `out`), the shared `source`
//! configuration block, and the wire types of the Spinnaker API.

pub mod check;
pub mod get;
pub mod put;
pub mod source;
pub mod spinnaker;

use serde::{Deserialize, Serialize};

use crate::domain::version::Version;

/// A single name/value pair of display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPair {
    pub name: String,
    pub value: String,
}

impl MetadataPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Response of the `in` and `out` steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: Version,
    #[serde(default)]
    pub metadata: Vec<MetadataPair>,
}
