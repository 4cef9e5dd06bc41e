//! Loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons raw hypergraph input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    /// A hyperedge with no members
    #[error("hyperedge {index} is empty")]
    EmptyHyperedge {
        /// Position of the hyperedge in the raw input
        index: usize,
    },
    /// A vertex id below 1
    #[error("hyperedge {index} references vertex id {id} (ids are 1-based)")]
    InvalidVertexId {
        /// Position of the hyperedge in the raw input
        index: usize,
        /// The raw id
        id: i64,
    },
    /// A label below 1
    #[error("vertex {vertex} has label {label} (labels are 1-based)")]
    InvalidLabel {
        /// 0-based vertex id
        vertex: usize,
        /// The raw label
        label: i64,
    },
    /// Fewer labels than referenced vertices
    #[error("{labels} labels do not cover {vertices} referenced vertices")]
    MissingLabels {
        /// Labels supplied
        labels: usize,
        /// Vertices referenced by the hyperedges
        vertices: usize,
    },
    /// A line of an input file that does not parse
    #[error("{}:{line}: {reason}", .path.display())]
    Parse {
        /// Input file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },
}

/// Errors raised while loading a hypergraph.
#[derive(Debug, Error)]
pub enum HypergraphError {
    /// The input was read but is not a valid hypergraph
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),
    /// An input file could not be opened or read
    #[error("Failed to {op} {}: {source}", .path.display())]
    Io {
        /// Operation that failed, e.g. `open`
        op: &'static str,
        /// File the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HypergraphError {
    /// Builds an [`HypergraphError::Io`] for `op` on `path`.
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
