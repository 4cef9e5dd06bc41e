//! Readers for the on-disk dataset format.
//!
//! Hyperedge files hold one hyperedge per line as comma-separated 1-based
//! vertex ids. Label files hold the 1-based label of vertex `i` on line `i`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use hyperquery_common::DatasetKey;
use tracing::info;

use crate::{HypergraphError, HypergraphStore, MalformedInput};

/// A [`MalformedInput::Parse`] for `line` of `path`.
fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> HypergraphError {
    MalformedInput::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
    .into()
}

/// Parses a 1-based id or label.
fn parse_positive(
    token: &str,
    what: &str,
    path: &Path,
    line: usize,
) -> Result<i64, HypergraphError> {
    let value: i64 = token
        .parse()
        .map_err(|_| parse_error(path, line, format!("invalid {what} {token:?}")))?;
    if value < 1 {
        return Err(parse_error(path, line, format!("{what} {value} is not 1-based")));
    }
    Ok(value)
}

/// Parses hyperedge lines. Whitespace-only lines are skipped.
pub fn parse_hyperedges<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<Vec<Vec<i64>>, HypergraphError> {
    let mut hyperedges = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HypergraphError::io("read", path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let edge = line
            .split(',')
            .map(|token| parse_positive(token.trim(), "vertex id", path, i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        hyperedges.push(edge);
    }
    Ok(hyperedges)
}

/// Parses label lines. Blank lines are only accepted at the end of the file,
/// since line position determines the vertex.
pub fn parse_labels<R: BufRead>(reader: R, path: &Path) -> Result<Vec<i64>, HypergraphError> {
    let mut labels = Vec::new();
    let mut blank_line = None;
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HypergraphError::io("read", path, e))?;
        let line = line.trim();
        if line.is_empty() {
            blank_line.get_or_insert(i + 1);
            continue;
        }
        if let Some(blank) = blank_line {
            return Err(parse_error(path, blank, "missing label"));
        }
        labels.push(parse_positive(line, "label", path, i + 1)?);
    }
    Ok(labels)
}

/// Opens `path` for buffered reading.
fn open(path: &Path) -> Result<BufReader<File>, HypergraphError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| HypergraphError::io("open", path, e))
}

impl HypergraphStore {
    /// Reads a hyperedge file and a label file and builds the store.
    pub fn load_files(hyperedge_path: &Path, label_path: &Path) -> Result<Self, HypergraphError> {
        let start = Instant::now();
        let hyperedges = parse_hyperedges(open(hyperedge_path)?, hyperedge_path)?;
        let labels = parse_labels(open(label_path)?, label_path)?;
        info!(
            "Read {} hyperedges and {} labels in {:?}",
            hyperedges.len(),
            labels.len(),
            start.elapsed()
        );
        Self::build(hyperedges, &labels)
    }

    /// Loads the dataset identified by `key` from its standard layout.
    pub fn load(key: &DatasetKey) -> Result<Self, HypergraphError> {
        info!("Loading dataset {} from {}", key.name(), key.dataset_dir().display());
        let store = Self::load_files(&key.hyperedge_file(), &key.label_file())?;
        info!("[Statistics] {}: {}", key.name(), store.stats());
        Ok(store)
    }
}
