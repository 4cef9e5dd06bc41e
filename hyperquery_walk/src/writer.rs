//! Rendering walks in the query file format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hyperquery_hypergraph::HypergraphStore;
use itertools::Itertools;

use crate::{Walk, WalkError};

/// Renders a walk in the query format:
///
/// ```text
/// <num_vertices> <num_hyperedges>
/// <label of local vertex 0> <label of local vertex 1> ...
/// <local ids of hyperedge 0, comma-separated, ascending>
/// ...
/// ```
pub fn render(walk: &Walk, store: &HypergraphStore) -> String {
    let mut lines = Vec::with_capacity(walk.num_hyperedges() + 2);
    lines.push(format!("{} {}", walk.num_vertices(), walk.num_hyperedges()));
    lines.push(walk.labels(store).iter().join(" "));
    lines.extend(
        walk.local_hyperedges(store)
            .into_iter()
            .map(|members| members.iter().join(",")),
    );
    lines.join("\n")
}

/// Writes the rendered walk, followed by a newline, to `path`.
pub fn write_query(walk: &Walk, store: &HypergraphStore, path: &Path) -> Result<(), WalkError> {
    let file = File::create(path).map_err(|e| WalkError::io("create", path, e))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", render(walk, store)).map_err(|e| WalkError::io("write", path, e))?;
    out.flush().map_err(|e| WalkError::io("flush", path, e))?;
    Ok(())
}
