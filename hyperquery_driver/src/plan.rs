//! Expansion of a generation config into independent walk tasks.
//!
//! Each task carries its own seed, derived from the run seed and the task's
//! `(length, index)` pair, so the walk a task produces does not depend on
//! which worker runs it or in what order.

use contracts::*;
use hyperquery_common::GenerationConfig;

/// One walk to sample and write as `query_<length>_<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalkTask {
    /// Hyperedges in the walk
    pub length: usize,
    /// Sample number within the length
    pub index: usize,
    /// Seed of the task's RNG
    pub seed: u64,
}

/// Every task of one run, in config order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Seed the task seeds are derived from
    base_seed: u64,
    /// Planned tasks
    tasks: Vec<WalkTask>,
}

impl GenerationPlan {
    /// Lengths in config order, indices `0..samples_per_length` within each.
    #[debug_ensures(ret.tasks.len() == config.total_tasks())]
    pub fn from_config(config: &GenerationConfig, base_seed: u64) -> Self {
        let tasks = config
            .lengths
            .iter()
            .flat_map(|&length| {
                (0..config.samples_per_length).map(move |index| WalkTask {
                    length,
                    index,
                    seed: task_seed(base_seed, length, index),
                })
            })
            .collect();
        Self { base_seed, tasks }
    }

    /// Seed the task seeds are derived from.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Planned tasks.
    pub fn tasks(&self) -> &[WalkTask] {
        &self.tasks
    }

    /// Number of planned tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the plan has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// SplitMix64 finalizer.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of the task `(length, index)` in a run seeded with `base_seed`.
fn task_seed(base_seed: u64, length: usize, index: usize) -> u64 {
    let task = splitmix64(length as u64) ^ (index as u64).rotate_left(32);
    splitmix64(base_seed ^ splitmix64(task))
}
