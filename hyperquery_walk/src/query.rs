//! Reading query files back.
//!
//! The matcher reads the vertex and hyperedge counts from the first line, the
//! vertex labels from the second, and one comma-separated membership line per
//! hyperedge after that. [`QueryHypergraph`] parses the same layout and checks
//! that the counts agree with the content.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hyperquery_hypergraph::Label;
use thiserror::Error;

/// Errors raised while reading a query file.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The text does not follow the query format
    #[error("line {line}: {reason}")]
    Format {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },
    /// The file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Query file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// A format error, with the file it occurred in
    #[error("{}: {source}", .path.display())]
    InFile {
        /// Query file path
        path: PathBuf,
        /// The format error
        #[source]
        source: Box<QueryError>,
    },
}

/// A [`QueryError::Format`] for `line`.
fn format_error(line: usize, reason: impl Into<String>) -> QueryError {
    QueryError::Format {
        line,
        reason: reason.into(),
    }
}

/// Parses one numeric token of `line`.
fn parse_number<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, QueryError> {
    token
        .trim()
        .parse()
        .map_err(|_| format_error(line, format!("invalid {what} {token:?}")))
}

/// A query hypergraph as stored in a query file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHypergraph {
    /// Label of each local vertex
    labels: Vec<Label>,
    /// Local member ids of each hyperedge
    hyperedges: Vec<Vec<usize>>,
}

impl QueryHypergraph {
    /// Reads and parses a query file.
    pub fn read(path: &Path) -> Result<Self, QueryError> {
        let text = std::fs::read_to_string(path).map_err(|source| QueryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse().map_err(|e| QueryError::InFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Number of local vertices.
    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Number of hyperedges.
    pub fn num_hyperedges(&self) -> usize {
        self.hyperedges.len()
    }

    /// Sum of hyperedge sizes.
    pub fn total_arity(&self) -> usize {
        self.hyperedges.iter().map(Vec::len).sum()
    }

    /// Number of distinct labels.
    pub fn num_labels(&self) -> usize {
        self.labels.iter().collect::<HashSet<_>>().len()
    }

    /// Labels, indexed by local vertex id.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Local member ids of each hyperedge, as written.
    pub fn hyperedges(&self) -> &[Vec<usize>] {
        &self.hyperedges
    }

    /// Whether consecutive hyperedges share a vertex, as every sampled walk does.
    pub fn is_walk_connected(&self) -> bool {
        self.hyperedges
            .windows(2)
            .all(|pair| pair[0].iter().any(|v| pair[1].contains(v)))
    }
}

impl FromStr for QueryHypergraph {
    type Err = QueryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (_, header) = lines.next().ok_or_else(|| format_error(1, "missing header"))?;
        let counts: Vec<&str> = header.split_whitespace().collect();
        let [vertices, edges] = counts.as_slice() else {
            return Err(format_error(1, "header must be `<num_vertices> <num_hyperedges>`"));
        };
        let num_vertices: usize = parse_number(vertices, 1, "vertex count")?;
        let num_hyperedges: usize = parse_number(edges, 1, "hyperedge count")?;

        let (_, label_line) = lines.next().ok_or_else(|| format_error(2, "missing label line"))?;
        let labels = label_line
            .split_whitespace()
            .map(|token| parse_number::<Label>(token, 2, "label"))
            .collect::<Result<Vec<_>, _>>()?;
        if labels.len() != num_vertices {
            return Err(format_error(
                2,
                format!("expected {num_vertices} labels, found {}", labels.len()),
            ));
        }

        let mut hyperedges = Vec::with_capacity(num_hyperedges);
        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            if hyperedges.len() == num_hyperedges {
                return Err(format_error(line_no, "more hyperedges than the header declares"));
            }
            let members = line
                .split(',')
                .map(|token| parse_number::<usize>(token, line_no, "vertex"))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(&v) = members.iter().find(|&&v| v >= num_vertices) {
                return Err(format_error(
                    line_no,
                    format!("vertex {v} out of range for {num_vertices} vertices"),
                ));
            }
            hyperedges.push(members);
        }
        if hyperedges.len() != num_hyperedges {
            return Err(format_error(
                text.lines().count(),
                format!("expected {num_hyperedges} hyperedges, found {}", hyperedges.len()),
            ));
        }

        Ok(Self { labels, hyperedges })
    }
}

impl fmt::Display for QueryHypergraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V, E, TotalArity = {}, {}, {}; #VLabel = {}",
            self.num_vertices(),
            self.num_hyperedges(),
            self.total_arity(),
            self.num_labels()
        )
    }
}
