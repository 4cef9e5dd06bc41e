//! A sampled walk and its compact vertex numbering.

use hyperquery_hypergraph::{HyperedgeId, HypergraphStore, Label, VertexId};
use indexmap::IndexSet;

/// An ordered, non-repeating sequence of hyperedges plus a compact vertex
/// relabeling.
///
/// Local vertex ids are assigned in order of first appearance while scanning
/// the selected hyperedges in selection order.
#[derive(Debug, Clone)]
pub struct Walk {
    /// Hyperedges in selection order
    selected_hyperedges: Vec<HyperedgeId>,
    /// Vertex drawn after entering each selected hyperedge.
    transition_vertices: Vec<VertexId>,
    /// Original vertex ids; a vertex's position is its local id.
    vertex_remap: IndexSet<VertexId>,
}

impl Walk {
    /// Builds the walk and its vertex remap.
    pub(crate) fn new(
        store: &HypergraphStore,
        selected_hyperedges: Vec<HyperedgeId>,
        transition_vertices: Vec<VertexId>,
    ) -> Self {
        let vertex_remap = selected_hyperedges
            .iter()
            .flat_map(|&e| store.hyperedge(e).iter().copied())
            .collect();
        Self {
            selected_hyperedges,
            transition_vertices,
            vertex_remap,
        }
    }

    /// Hyperedges in selection order.
    pub fn selected_hyperedges(&self) -> &[HyperedgeId] {
        &self.selected_hyperedges
    }

    /// Vertex the walk continued from after each selected hyperedge.
    pub fn transition_vertices(&self) -> &[VertexId] {
        &self.transition_vertices
    }

    /// Original vertex ids ordered by local id.
    pub fn vertex_remap(&self) -> &IndexSet<VertexId> {
        &self.vertex_remap
    }

    /// Distinct vertices touched by the walk.
    pub fn num_vertices(&self) -> usize {
        self.vertex_remap.len()
    }

    /// Number of selected hyperedges.
    pub fn num_hyperedges(&self) -> usize {
        self.selected_hyperedges.len()
    }

    /// Local id of an original vertex, if the walk touches it.
    pub fn local_id(&self, v: VertexId) -> Option<usize> {
        self.vertex_remap.get_index_of(&v)
    }

    /// Labels of the walk's vertices, ordered by local id.
    pub fn labels(&self, store: &HypergraphStore) -> Vec<Label> {
        self.vertex_remap.iter().map(|&v| store.label(v)).collect()
    }

    /// Local member ids of each selected hyperedge, sorted ascending.
    pub fn local_hyperedges(&self, store: &HypergraphStore) -> Vec<Vec<usize>> {
        self.selected_hyperedges
            .iter()
            .map(|&e| {
                let mut local: Vec<usize> = store
                    .hyperedge(e)
                    .iter()
                    .filter_map(|&v| self.local_id(v))
                    .collect();
                local.sort_unstable();
                local
            })
            .collect()
    }
}
