//! Core domain types
//!
//! This module contains the domain structures used across the resource.
//! They are pure data plus the logic that works on them; nothing here
//! performs I/O.

pub mod execution;
pub mod status;
pub mod version;
