//! Biased random walks over a hypergraph and the query file format.
//!
//! A [`WalkSampler`] walks a [`HypergraphStore`](hyperquery_hypergraph::HypergraphStore)
//! hyperedge by hyperedge, always continuing through a vertex of the current
//! hyperedge, so the selected hyperedges form a connected sub-hypergraph.
//! The resulting [`Walk`] is rendered into the text format read by the
//! subhypergraph matcher, and [`QueryHypergraph`] reads that format back.

mod error;
mod query;
mod sampler;
mod walk;
mod writer;

pub use error::WalkError;
pub use query::{QueryError, QueryHypergraph};
pub use sampler::WalkSampler;
pub use walk::Walk;
pub use writer::{render, write_query};
