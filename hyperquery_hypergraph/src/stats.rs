//! Dataset statistics.

use std::collections::HashSet;
use std::fmt;

use crate::HypergraphStore;

/// Summary of a loaded hypergraph, logged once per dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypergraphStats {
    /// One past the largest vertex id
    pub num_vertices: usize,
    /// Distinct hyperedges
    pub num_hyperedges: usize,
    /// Sum of hyperedge sizes
    pub total_arity: usize,
    /// Distinct labels among referenced vertices
    pub num_labels: usize,
    /// Largest number of hyperedges sharing a vertex
    pub max_degree: usize,
    /// Largest hyperedge size
    pub max_arity: usize,
    /// Hyperedges whose members all have degree 1
    pub degenerate_hyperedges: usize,
}

impl HypergraphStats {
    /// Computes the statistics of `store`.
    pub(crate) fn collect(store: &HypergraphStore) -> Self {
        let referenced = (0..store.num_vertices()).filter(|&v| store.degree(v) > 0);
        let num_labels = referenced
            .map(|v| store.label(v))
            .collect::<HashSet<_>>()
            .len();

        Self {
            num_vertices: store.num_vertices(),
            num_hyperedges: store.num_hyperedges(),
            total_arity: store.hyperedges().iter().map(Vec::len).sum(),
            num_labels,
            max_degree: store.degree_sequence().iter().copied().max().unwrap_or(0),
            max_arity: store.hyperedges().iter().map(Vec::len).max().unwrap_or(0),
            degenerate_hyperedges: store.degenerate_hyperedges().count(),
        }
    }
}

impl fmt::Display for HypergraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V, E, TotalArity = {}, {}, {}; #VLabel = {}; MaxDegree, MaxArity = {}, {}; Degenerate = {}",
            self.num_vertices,
            self.num_hyperedges,
            self.total_arity,
            self.num_labels,
            self.max_degree,
            self.max_arity,
            self.degenerate_hyperedges
        )
    }
}
