//! Query generation configuration.
//!
//! Mirrors the batch the external benchmark expects: walks of several lengths,
//! a fixed number of samples per length. The configuration can be loaded from
//! a JSON file and overridden from the command line.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Walk lengths generated when none are configured.
pub const DEFAULT_LENGTHS: [usize; 6] = [3, 4, 5, 6, 7, 8];
/// Samples generated per walk length when none are configured.
pub const DEFAULT_SAMPLES_PER_LENGTH: usize = 200;
/// Fresh walks attempted for a single task before it is reported as stuck.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Errors raised while loading or validating a [`GenerationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying read error
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for a [`GenerationConfig`]
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
    /// The config parsed but describes an unusable batch
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for one generation run over a single dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of hyperedges in each generated walk
    pub lengths: Vec<usize>,
    /// Number of walks generated for each length
    pub samples_per_length: usize,
    /// Base seed; a random seed is drawn (and logged) when absent
    pub seed: Option<u64>,
    /// Fresh walks attempted per task when a walk gets stuck
    pub max_attempts: usize,
    /// Run tasks on the rayon pool
    pub parallel: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            lengths: DEFAULT_LENGTHS.to_vec(),
            samples_per_length: DEFAULT_SAMPLES_PER_LENGTH,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            parallel: true,
        }
    }
}

impl GenerationConfig {
    /// Parses a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads and validates a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!("Loaded generation config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Rejects configurations that cannot produce a well-formed batch.
    ///
    /// A length listed twice would plan two tasks per query file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lengths.is_empty() {
            return Err(ConfigError::Invalid("no walk lengths configured".into()));
        }
        if self.lengths.contains(&0) {
            return Err(ConfigError::Invalid("walk length must be at least 1".into()));
        }
        let mut seen = HashSet::with_capacity(self.lengths.len());
        if let Some(length) = self.lengths.iter().find(|&&l| !seen.insert(l)) {
            return Err(ConfigError::Invalid(format!("walk length {length} listed twice")));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        Ok(())
    }

    /// Replaces the walk lengths.
    #[must_use]
    pub fn with_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.lengths = lengths;
        self
    }

    /// Sets the number of walks per length.
    #[must_use]
    pub fn with_samples_per_length(mut self, samples: usize) -> Self {
        self.samples_per_length = samples;
        self
    }

    /// Fixes the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the fresh walks tried per task.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Enables or disables the rayon pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Total number of walks the configuration asks for.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.lengths.len() * self.samples_per_length
    }
}
