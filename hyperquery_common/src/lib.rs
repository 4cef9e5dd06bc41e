//! Common utilities and shared types for the hyperquery workspace.
//!
//! This crate provides dataset layout resolution, generation configuration,
//! and the small fixture hypergraphs used by tests across the workspace.

mod config;
mod dataset;
mod test_cases;

pub use crate::config::*;
pub use crate::dataset::*;
pub use crate::test_cases::*;
