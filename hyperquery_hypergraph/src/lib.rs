//! In-memory hypergraph store for query generation.
//!
//! This crate parses a dataset's raw hyperedge and label files into an
//! immutable [`HypergraphStore`] and derives the statistics the walk sampler
//! needs: degree sequence, incidence index and per-hyperedge continuation
//! weights.

mod error;
pub mod loader;
mod stats;
mod store;

pub use error::{HypergraphError, MalformedInput};
pub use stats::HypergraphStats;
pub use store::{ContinuationWeights, HypergraphStore};

/// Dense 0-based vertex id.
pub type VertexId = usize;
/// Dense index of a hyperedge in the store.
pub type HyperedgeId = usize;
/// Vertex label, normalized to 0-based.
pub type Label = u32;
