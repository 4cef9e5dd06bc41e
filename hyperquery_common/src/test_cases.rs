//! Small hypergraph fixtures shared by the tests of every crate.
//!
//! Each case is given in the raw on-disk form (1-based vertex ids, 1-based
//! labels) together with the facts a correctly built store must report.

use std::path::Path;

use crate::DatasetKey;

/// A raw hypergraph with its expected derived statistics.
#[derive(Debug, Clone)]
pub struct HypergraphCase {
    /// The name of the case.
    pub name: &'static str,
    /// Raw hyperedges, 1-based vertex ids, possibly with duplicates.
    pub hyperedges: Vec<Vec<i64>>,
    /// Raw labels, 1-based; entry `i` labels vertex `i`.
    pub labels: Vec<i64>,
    /// Expected vertex count after normalization.
    pub expected_vertices: usize,
    /// Expected hyperedge count after deduplication.
    pub expected_hyperedges: usize,
    /// Expected degree of every 0-based vertex.
    pub expected_degrees: Vec<usize>,
}

impl HypergraphCase {
    /// Contents of the hyperedge file (`hyperedges-<name>.txt`).
    pub fn hyperedge_file_contents(&self) -> String {
        self.hyperedges
            .iter()
            .map(|edge| {
                edge.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .map(|line| line + "\n")
            .collect()
    }

    /// Contents of the label file (`node-labels-<name>.txt`).
    pub fn label_file_contents(&self) -> String {
        self.labels.iter().map(|l| format!("{l}\n")).collect()
    }

    /// Writes this case as dataset `name` under `root` and returns its key.
    pub fn write_dataset(&self, root: &Path) -> std::io::Result<DatasetKey> {
        let key = DatasetKey::new(root, self.name);
        std::fs::create_dir_all(key.dataset_dir())?;
        std::fs::write(key.hyperedge_file(), self.hyperedge_file_contents())?;
        std::fs::write(key.label_file(), self.label_file_contents())?;
        Ok(key)
    }
}

lazy_static::lazy_static! {
    /// Three hyperedges in a chain: `{0,1}`, `{1,2,3}`, `{2,3}`.
    pub static ref CHAIN_CASE: HypergraphCase = HypergraphCase {
        name: "chain",
        hyperedges: vec![vec![1, 2], vec![2, 3, 4], vec![3, 4]],
        labels: vec![1, 2, 2, 3],
        expected_vertices: 4,
        expected_hyperedges: 3,
        expected_degrees: vec![1, 2, 2, 2],
    };

    /// Repeated hyperedges (in different member order) and repeated members.
    pub static ref DUPLICATE_CASE: HypergraphCase = HypergraphCase {
        name: "duplicates",
        hyperedges: vec![vec![1, 2], vec![2, 1], vec![2, 3], vec![3, 2, 2], vec![1]],
        labels: vec![1, 1, 2],
        expected_vertices: 3,
        expected_hyperedges: 3,
        expected_degrees: vec![2, 2, 1],
    };

    /// `{0,1}` has only degree-one members, so its weights are undefined.
    pub static ref DEGENERATE_CASE: HypergraphCase = HypergraphCase {
        name: "degenerate",
        hyperedges: vec![vec![1, 2], vec![3, 4, 5], vec![5, 6]],
        labels: vec![1, 1, 1, 2, 2, 3],
        expected_vertices: 6,
        expected_hyperedges: 3,
        expected_degrees: vec![1, 1, 1, 1, 2, 1],
    };

    /// Vertex 0 is a hub contained in four of five hyperedges.
    pub static ref STAR_CASE: HypergraphCase = HypergraphCase {
        name: "star",
        hyperedges: vec![
            vec![1, 2],
            vec![1, 3],
            vec![1, 4, 5],
            vec![1, 6],
            vec![2, 3, 7],
        ],
        labels: vec![1, 2, 2, 3, 3, 4, 5],
        expected_vertices: 7,
        expected_hyperedges: 5,
        expected_degrees: vec![4, 2, 2, 1, 1, 1, 1],
    };

    /// Every fixture above.
    pub static ref HYPERGRAPH_CASES: Vec<&'static HypergraphCase> = vec![
        &CHAIN_CASE,
        &DUPLICATE_CASE,
        &DEGENERATE_CASE,
        &STAR_CASE,
    ];
}
