//! Dataset identification and on-disk layout.
//!
//! A dataset `D` under a root `R` lives in `R/D/` and consists of
//! `hyperedges-D.txt` and `node-labels-D.txt`. Generated queries are written
//! to `R/D/queries/query_<length>_<index>.txt`, which is where the external
//! matcher looks for them.

use std::path::{Path, PathBuf};

use contracts::*;

/// Name of the directory (inside the dataset directory) holding query files.
pub const QUERY_DIR_NAME: &str = "queries";

/// Unique identifier for a hypergraph dataset.
///
/// Two keys are the same dataset if they share the root directory and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    /// Directory containing one subdirectory per dataset
    pub root: PathBuf,
    /// Dataset name, e.g. `amazon-reviews`
    pub name: String,
}

impl DatasetKey {
    /// Creates a new dataset key.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding the dataset directories
    /// * `name` - Name of the dataset
    #[requires(!name.as_ref().is_empty())]
    pub fn new<P, S>(root: P, name: S) -> Self
    where
        P: Into<PathBuf>,
        S: AsRef<str> + Into<String>,
    {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a key for the same dataset with the root replaced.
    #[must_use]
    pub fn with_root<P: Into<PathBuf>>(&self, root: P) -> Self {
        Self {
            root: root.into(),
            name: self.name.clone(),
        }
    }

    /// Directory holding the dataset's files.
    #[must_use]
    pub fn dataset_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Path of the hyperedge file (`hyperedges-<name>.txt`).
    #[must_use]
    pub fn hyperedge_file(&self) -> PathBuf {
        self.dataset_dir().join(format!("hyperedges-{}.txt", self.name))
    }

    /// Path of the label file (`node-labels-<name>.txt`).
    #[must_use]
    pub fn label_file(&self) -> PathBuf {
        self.dataset_dir().join(format!("node-labels-{}.txt", self.name))
    }

    /// Directory the generated queries are written to.
    #[must_use]
    pub fn query_dir(&self) -> PathBuf {
        self.dataset_dir().join(QUERY_DIR_NAME)
    }

    /// Path of the query file for the `index`-th walk of the given length.
    #[must_use]
    pub fn query_file(&self, length: usize, index: usize) -> PathBuf {
        self.query_dir().join(format!("{}.txt", query_name(length, index)))
    }
}

/// Query name as passed to the matcher's `-q` flag (file stem, no extension).
#[must_use]
pub fn query_name(length: usize, index: usize) -> String {
    format!("query_{length}_{index}")
}

/// Parses a query file stem of the form `query_<length>_<index>`.
#[must_use]
pub fn parse_query_name(stem: &str) -> Option<(usize, usize)> {
    let rest = stem.strip_prefix("query_")?;
    let (length, index) = rest.split_once('_')?;
    Some((length.parse().ok()?, index.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_layout() {
        let key = DatasetKey::new("/data/hypergraphs", "amazon-reviews");
        assert_eq!(
            key.hyperedge_file(),
            PathBuf::from("/data/hypergraphs/amazon-reviews/hyperedges-amazon-reviews.txt")
        );
        assert_eq!(
            key.label_file(),
            PathBuf::from("/data/hypergraphs/amazon-reviews/node-labels-amazon-reviews.txt")
        );
        assert_eq!(
            key.query_file(3, 17),
            PathBuf::from("/data/hypergraphs/amazon-reviews/queries/query_3_17.txt")
        );
    }

    #[test]
    fn test_with_root_keeps_name() {
        let key = DatasetKey::new("a", "house-committees");
        let moved = key.with_root("b");
        assert_eq!(moved.name(), "house-committees");
        assert_eq!(moved.root(), Path::new("b"));
        assert_ne!(key, moved);
    }

    #[test]
    #[should_panic]
    fn test_empty_name_rejected() {
        let _ = DatasetKey::new("root", "");
    }

    #[test]
    fn test_parse_query_name() {
        assert_eq!(parse_query_name("query_8_199"), Some((8, 199)));
        assert_eq!(parse_query_name("query_8"), None);
        assert_eq!(parse_query_name("walk_3_1"), None);
        assert_eq!(parse_query_name("query_x_1"), None);
    }
}
