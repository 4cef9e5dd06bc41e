//! The immutable hypergraph store and its derived indices.

use contracts::*;
use indexmap::IndexSet;
use tracing::debug;

use crate::{HyperedgeId, HypergraphError, HypergraphStats, Label, MalformedInput, VertexId};

/// Distribution used to pick the vertex a walk continues from after entering
/// a hyperedge.
#[derive(Debug, Clone, PartialEq)]
pub enum ContinuationWeights {
    /// Probabilities parallel to the hyperedge's members, proportional to
    /// `degree - 1` and summing to 1.
    Weighted(Vec<f64>),
    /// Every member has degree 1, so `degree - 1` sums to zero. Walks entering
    /// such a hyperedge continue from a uniformly chosen member.
    Degenerate,
}

impl ContinuationWeights {
    /// Weights proportional to `degree - 1` of each member.
    fn from_degrees(degrees: &[usize]) -> Self {
        let raw: Vec<f64> = degrees.iter().map(|&d| d.saturating_sub(1) as f64).collect();
        let total: f64 = raw.iter().sum();
        if total == 0.0 {
            return Self::Degenerate;
        }
        Self::Weighted(raw.into_iter().map(|w| w / total).collect())
    }

    /// Whether every member has degree 1.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }

    /// Normalized probabilities, or `None` for a degenerate hyperedge.
    pub fn probabilities(&self) -> Option<&[f64]> {
        match self {
            Self::Weighted(p) => Some(p),
            Self::Degenerate => None,
        }
    }
}

/// Immutable hypergraph with the derived indices used by the walk sampler.
///
/// Vertex ids are dense in `[0, num_vertices)` and hyperedge ids are dense in
/// `[0, num_hyperedges)`. Hyperedge members are sorted ascending.
#[derive(Debug, Clone)]
pub struct HypergraphStore {
    /// Sorted members of each hyperedge
    hyperedges: Vec<Vec<VertexId>>,
    /// 0-based label of each vertex
    node_labels: Vec<Label>,
    /// Number of hyperedges containing each vertex
    degree_sequence: Vec<usize>,
    /// Hyperedges containing each vertex
    incidence_index: Vec<Vec<HyperedgeId>>,
    /// Continuation distribution of each hyperedge
    continuation_weights: Vec<ContinuationWeights>,
}

impl HypergraphStore {
    /// Builds a store from raw input.
    ///
    /// `raw_hyperedges` hold 1-based vertex ids; `raw_labels[i]` is the
    /// 1-based label of vertex `i`. Ids and labels are normalized to 0-based,
    /// and hyperedges with the same member set are kept once, in first-seen
    /// order. Labels beyond the highest referenced vertex are ignored.
    #[debug_ensures(ret.as_ref().map_or(true, |s| s.degree_sequence.len() == s.num_vertices()))]
    #[debug_ensures(ret.as_ref().map_or(true, |s| s.continuation_weights.len() == s.num_hyperedges()))]
    pub fn build<I, E>(raw_hyperedges: I, raw_labels: &[i64]) -> Result<Self, HypergraphError>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[i64]>,
    {
        let hyperedges = Self::normalize_hyperedges(raw_hyperedges)?;

        let num_vertices = hyperedges
            .iter()
            .filter_map(|e| e.last())
            .max()
            .map_or(0, |&v| v + 1);

        let node_labels = Self::normalize_labels(raw_labels, num_vertices)?;

        // One pass over all (hyperedge, vertex) memberships.
        let mut incidence_index: Vec<Vec<HyperedgeId>> = vec![Vec::new(); num_vertices];
        let mut degree_sequence = vec![0usize; num_vertices];
        for (e, members) in hyperedges.iter().enumerate() {
            for &v in members {
                incidence_index[v].push(e);
                degree_sequence[v] += 1;
            }
        }

        let continuation_weights: Vec<ContinuationWeights> = hyperedges
            .iter()
            .map(|members| {
                let degrees: Vec<usize> = members.iter().map(|&v| degree_sequence[v]).collect();
                ContinuationWeights::from_degrees(&degrees)
            })
            .collect();

        let store = Self {
            hyperedges,
            node_labels,
            degree_sequence,
            incidence_index,
            continuation_weights,
        };
        debug!(
            "Built hypergraph store: {} vertices, {} hyperedges, {} degenerate",
            store.num_vertices(),
            store.num_hyperedges(),
            store.degenerate_hyperedges().count()
        );
        Ok(store)
    }

    /// Converts raw hyperedges to sorted 0-based member lists, keeping each
    /// member set once.
    fn normalize_hyperedges<I, E>(
        raw_hyperedges: I,
    ) -> Result<Vec<Vec<VertexId>>, MalformedInput>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[i64]>,
    {
        let mut distinct: IndexSet<Vec<VertexId>> = IndexSet::new();
        let mut raw_count = 0usize;
        for (index, raw) in raw_hyperedges.into_iter().enumerate() {
            raw_count += 1;
            let raw = raw.as_ref();
            if raw.is_empty() {
                return Err(MalformedInput::EmptyHyperedge { index });
            }
            let mut members = raw
                .iter()
                .map(|&id| {
                    id.checked_sub(1)
                        .filter(|&v| v >= 0)
                        .and_then(|v| VertexId::try_from(v).ok())
                        .ok_or(MalformedInput::InvalidVertexId { index, id })
                })
                .collect::<Result<Vec<_>, _>>()?;
            members.sort_unstable();
            members.dedup();
            distinct.insert(members);
        }
        if raw_count != distinct.len() {
            debug!("Collapsed {} duplicate hyperedges", raw_count - distinct.len());
        }
        Ok(distinct.into_iter().collect())
    }

    /// Converts the labels of the first `num_vertices` vertices to 0-based.
    fn normalize_labels(
        raw_labels: &[i64],
        num_vertices: usize,
    ) -> Result<Vec<Label>, MalformedInput> {
        if raw_labels.len() < num_vertices {
            return Err(MalformedInput::MissingLabels {
                labels: raw_labels.len(),
                vertices: num_vertices,
            });
        }
        if raw_labels.len() > num_vertices {
            debug!(
                "Ignoring {} labels of unreferenced trailing vertices",
                raw_labels.len() - num_vertices
            );
        }
        raw_labels[..num_vertices]
            .iter()
            .enumerate()
            .map(|(vertex, &label)| {
                label
                    .checked_sub(1)
                    .and_then(|l| Label::try_from(l).ok())
                    .ok_or(MalformedInput::InvalidLabel { vertex, label })
            })
            .collect()
    }

    /// Number of vertices, one past the largest vertex id.
    pub fn num_vertices(&self) -> usize {
        self.degree_sequence.len()
    }

    /// Number of distinct hyperedges.
    pub fn num_hyperedges(&self) -> usize {
        self.hyperedges.len()
    }

    /// All hyperedges, indexed by [`HyperedgeId`].
    pub fn hyperedges(&self) -> &[Vec<VertexId>] {
        &self.hyperedges
    }

    /// Members of hyperedge `e`, sorted ascending.
    pub fn hyperedge(&self, e: HyperedgeId) -> &[VertexId] {
        &self.hyperedges[e]
    }

    /// Number of members of hyperedge `e`.
    pub fn arity(&self, e: HyperedgeId) -> usize {
        self.hyperedges[e].len()
    }

    /// 0-based labels, indexed by [`VertexId`].
    pub fn node_labels(&self) -> &[Label] {
        &self.node_labels
    }

    /// 0-based label of `v`.
    pub fn label(&self, v: VertexId) -> Label {
        self.node_labels[v]
    }

    /// Degrees, indexed by [`VertexId`].
    pub fn degree_sequence(&self) -> &[usize] {
        &self.degree_sequence
    }

    /// Number of hyperedges containing `v`.
    pub fn degree(&self, v: VertexId) -> usize {
        self.degree_sequence[v]
    }

    /// Incident hyperedges of every vertex.
    pub fn incidence_index(&self) -> &[Vec<HyperedgeId>] {
        &self.incidence_index
    }

    /// Hyperedges containing `v`, in ascending order.
    pub fn incident_hyperedges(&self, v: VertexId) -> &[HyperedgeId] {
        &self.incidence_index[v]
    }

    /// How a walk entering `e` picks its next vertex.
    pub fn continuation_weights(&self, e: HyperedgeId) -> &ContinuationWeights {
        &self.continuation_weights[e]
    }

    /// Hyperedges whose members all have degree 1.
    pub fn degenerate_hyperedges(&self) -> impl Iterator<Item = HyperedgeId> + '_ {
        self.continuation_weights
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_degenerate())
            .map(|(e, _)| e)
    }

    /// Summary statistics, as logged on load.
    pub fn stats(&self) -> HypergraphStats {
        HypergraphStats::collect(self)
    }
}
