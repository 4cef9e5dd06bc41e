//! The driver for query generation runs.
//!
//! This crate caches loaded datasets, expands a [`GenerationConfig`] into
//! independent walk tasks and executes them, writing one query file per
//! successful walk.

pub mod driver;
pub mod generate;
pub mod plan;

pub use driver::{Driver, DriverError};
pub use generate::{GenerationReport, TaskFailure};
pub use plan::{GenerationPlan, WalkTask};

pub use hyperquery_common::{DatasetKey, GenerationConfig};
pub use hyperquery_hypergraph::HypergraphStore;
