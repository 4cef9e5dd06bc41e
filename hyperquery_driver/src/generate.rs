//! Execution of a generation plan.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use hyperquery_common::{DatasetKey, GenerationConfig};
use hyperquery_hypergraph::HypergraphStore;
use hyperquery_walk::{WalkError, WalkSampler, write_query};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{Driver, DriverError, GenerationPlan, WalkTask};

/// A task that produced no query file.
#[derive(Debug)]
pub struct TaskFailure {
    /// The failed task
    pub task: WalkTask,
    /// Why it failed
    pub error: WalkError,
}

/// Outcome of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Seed the run's task seeds were derived from
    pub seed: u64,
    /// Query files written, in plan order
    pub written: Vec<PathBuf>,
    /// Tasks that produced no file, in plan order
    pub failures: Vec<TaskFailure>,
    /// Successful walks per length; every planned length has an entry
    pub counts: BTreeMap<usize, usize>,
}

impl GenerationReport {
    /// Number of tasks run.
    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    /// Whether every task wrote its query.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Driver {
    /// Samples and writes every query the configuration asks for.
    ///
    /// Loading and output-directory errors abort the run. A failed walk only
    /// costs its own query file and is recorded in the report.
    pub fn generate(
        &self,
        key: &DatasetKey,
        config: &GenerationConfig,
    ) -> Result<GenerationReport, DriverError> {
        config.validate()?;
        let store = self.get_or_load(key)?;

        let query_dir = key.query_dir();
        std::fs::create_dir_all(&query_dir).map_err(|source| DriverError::Io {
            op: "create",
            path: query_dir.clone(),
            source,
        })?;

        let seed = config.seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            info!("No seed configured; using {seed}");
            seed
        });
        let plan = GenerationPlan::from_config(config, seed);
        info!(
            "Generating {} queries for {} into {}",
            plan.len(),
            key.name(),
            query_dir.display()
        );

        let start = Instant::now();
        let outcomes = run_tasks(&store, key, &plan, config);

        let mut report = GenerationReport {
            seed,
            ..GenerationReport::default()
        };
        for &length in &config.lengths {
            report.counts.entry(length).or_insert(0);
        }
        for (task, outcome) in plan.tasks().iter().zip(outcomes) {
            match outcome {
                Ok(path) => {
                    *report.counts.entry(task.length).or_insert(0) += 1;
                    report.written.push(path);
                }
                Err(error) => {
                    warn!("Task query_{}_{} failed: {error}", task.length, task.index);
                    report.failures.push(TaskFailure { task: *task, error });
                }
            }
        }

        for (length, count) in &report.counts {
            debug!("Length {length}: {count}/{} written", config.samples_per_length);
        }
        info!(
            "Wrote {} of {} queries for {} in {:?} ({} failed)",
            report.written.len(),
            report.total(),
            key.name(),
            start.elapsed(),
            report.failures.len()
        );
        Ok(report)
    }
}

/// Runs every task of `plan`, on the rayon pool when enabled. Outcomes are in
/// plan order.
fn run_tasks(
    store: &HypergraphStore,
    key: &DatasetKey,
    plan: &GenerationPlan,
    config: &GenerationConfig,
) -> Vec<Result<PathBuf, WalkError>> {
    let sampler = WalkSampler::new(store);
    let run = |task: &WalkTask| run_task(sampler, key, task, config.max_attempts);

    #[cfg(feature = "parallel")]
    if config.parallel {
        return plan.tasks().par_iter().map(run).collect();
    }

    #[cfg(not(feature = "parallel"))]
    if config.parallel {
        debug!("Built without the parallel feature; running tasks sequentially");
    }

    plan.tasks().iter().map(run).collect()
}

/// Samples and writes one query. On failure no file is left at the task's
/// path, so the queries directory only holds output of the current run.
fn run_task(
    sampler: WalkSampler<'_>,
    key: &DatasetKey,
    task: &WalkTask,
    max_attempts: usize,
) -> Result<PathBuf, WalkError> {
    let path = key.query_file(task.length, task.index);
    let mut rng = StdRng::seed_from_u64(task.seed);
    let outcome = sampler
        .sample_with_retry(task.length, max_attempts, &mut rng)
        .and_then(|walk| write_query(&walk, sampler.store(), &path));
    match outcome {
        Ok(()) => Ok(path),
        Err(e) => {
            remove_stale(&path);
            Err(e)
        }
    }
}

/// Deletes a query file left by an earlier run, if any.
fn remove_stale(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed stale query {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove stale query {}: {e}", path.display()),
    }
}
