//! Per-walk errors.

use std::path::PathBuf;

use hyperquery_hypergraph::{HyperedgeId, VertexId};
use thiserror::Error;

/// Failures of a single walk. None of them affect the shared store.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A walk of zero hyperedges was requested
    #[error("Walk length must be at least 1")]
    ZeroLength,
    /// The hypergraph has fewer hyperedges than the requested length
    #[error("Requested {requested} distinct hyperedges but the hypergraph has {available}")]
    InsufficientHyperedges {
        /// Requested walk length
        requested: usize,
        /// Hyperedges in the store
        available: usize,
    },
    /// Every hyperedge incident to the continuation vertex is already used
    #[error("Walk stuck at vertex {vertex} after {selected} of {requested} hyperedges")]
    WalkStuck {
        /// Vertex the walk tried to continue from
        vertex: VertexId,
        /// Hyperedges selected before getting stuck
        selected: usize,
        /// Requested walk length
        requested: usize,
    },
    /// A start hyperedge outside the store
    #[error("Hyperedge {hyperedge} does not exist ({available} hyperedges)")]
    UnknownHyperedge {
        /// The requested start
        hyperedge: HyperedgeId,
        /// Hyperedges in the store
        available: usize,
    },
    /// Writing a query file failed
    #[error("Failed to {op} {}: {source}", .path.display())]
    Io {
        /// Operation that failed, e.g. `create`
        op: &'static str,
        /// Query file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl WalkError {
    /// Builds a [`WalkError::Io`] for `op` on `path`.
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Whether a fresh walk might succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WalkStuck { .. })
    }
}
