//! The random walk sampler.

use std::collections::HashSet;

use contracts::*;
use hyperquery_hypergraph::{ContinuationWeights, HyperedgeId, HypergraphStore, VertexId};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use tracing::{debug, trace, warn};

use crate::{Walk, WalkError};

/// Draws biased random walks over a shared, read-only store.
///
/// Each call keeps its state (`used`, the current vertex, the selection) on
/// its own stack, so one sampler can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct WalkSampler<'a> {
    /// Hypergraph the walks are drawn from
    store: &'a HypergraphStore,
}

impl<'a> WalkSampler<'a> {
    /// Creates a sampler over `store`.
    pub fn new(store: &'a HypergraphStore) -> Self {
        Self { store }
    }

    /// The sampled hypergraph.
    pub fn store(&self) -> &'a HypergraphStore {
        self.store
    }

    /// Samples a walk of `length` distinct hyperedges starting from a
    /// uniformly chosen hyperedge.
    #[debug_ensures(ret.as_ref().map_or(true, |w| w.num_hyperedges() == length))]
    pub fn sample<R: Rng + ?Sized>(
        &self,
        length: usize,
        rng: &mut R,
    ) -> Result<Walk, WalkError> {
        self.check_length(length)?;
        let start = rng.gen_range(0..self.store.num_hyperedges());
        self.walk_from(start, length, rng)
    }

    /// Samples a walk whose first hyperedge is `start`.
    #[debug_ensures(ret.as_ref().map_or(true, |w| w.selected_hyperedges()[0] == start))]
    pub fn sample_from<R: Rng + ?Sized>(
        &self,
        start: HyperedgeId,
        length: usize,
        rng: &mut R,
    ) -> Result<Walk, WalkError> {
        self.check_length(length)?;
        if start >= self.store.num_hyperedges() {
            return Err(WalkError::UnknownHyperedge {
                hyperedge: start,
                available: self.store.num_hyperedges(),
            });
        }
        self.walk_from(start, length, rng)
    }

    /// Samples a walk, starting over with a fresh walk whenever one gets
    /// stuck, for at most `max_attempts` walks. Other errors are returned
    /// immediately.
    pub fn sample_with_retry<R: Rng + ?Sized>(
        &self,
        length: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Walk, WalkError> {
        let max_attempts = max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.sample(length, rng) {
                Ok(walk) => return Ok(walk),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    debug!("Attempt {attempt}/{max_attempts}: {e}; restarting walk");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Rejects lengths no walk over this store can have.
    fn check_length(&self, length: usize) -> Result<(), WalkError> {
        if length == 0 {
            return Err(WalkError::ZeroLength);
        }
        if length > self.store.num_hyperedges() {
            return Err(WalkError::InsufficientHyperedges {
                requested: length,
                available: self.store.num_hyperedges(),
            });
        }
        Ok(())
    }

    /// Runs one walk from `start` until it has `length` hyperedges or gets
    /// stuck.
    fn walk_from<R: Rng + ?Sized>(
        &self,
        start: HyperedgeId,
        length: usize,
        rng: &mut R,
    ) -> Result<Walk, WalkError> {
        let mut used: HashSet<HyperedgeId> = HashSet::with_capacity(length);
        let mut selected = Vec::with_capacity(length);
        let mut transitions = Vec::with_capacity(length);

        let mut candidate = start;
        loop {
            used.insert(candidate);
            selected.push(candidate);
            let current = self.draw_continuation(candidate, rng);
            transitions.push(current);
            if selected.len() == length {
                break;
            }

            let unused: Vec<HyperedgeId> = self
                .store
                .incident_hyperedges(current)
                .iter()
                .copied()
                .filter(|e| !used.contains(e))
                .collect();
            candidate = *unused.choose(rng).ok_or(WalkError::WalkStuck {
                vertex: current,
                selected: selected.len(),
                requested: length,
            })?;
        }

        trace!("Walk {:?} via {:?}", selected, transitions);
        Ok(Walk::new(self.store, selected, transitions))
    }

    /// Picks the vertex the walk continues from after entering `e`.
    fn draw_continuation<R: Rng + ?Sized>(&self, e: HyperedgeId, rng: &mut R) -> VertexId {
        let members = self.store.hyperedge(e);
        let position = match self.store.continuation_weights(e) {
            ContinuationWeights::Weighted(p) => match WeightedIndex::<f64>::new(p) {
                Ok(dist) => dist.sample(rng),
                Err(err) => {
                    warn!("Hyperedge {e} has unusable weights ({err}); drawing uniformly");
                    rng.gen_range(0..members.len())
                }
            },
            ContinuationWeights::Degenerate => rng.gen_range(0..members.len()),
        };
        members[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn chain() -> HypergraphStore {
        HypergraphStore::build([vec![1i64, 2], vec![2, 3, 4], vec![3, 4]], &[1, 2, 2, 3]).unwrap()
    }

    #[test]
    fn test_forced_start_moves_through_hub() {
        let store = chain();
        let sampler = WalkSampler::new(&store);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let walk = sampler.sample_from(0, 2, &mut rng).unwrap();
            assert_eq!(walk.selected_hyperedges(), &[0, 1]);
            assert_eq!(walk.transition_vertices()[0], 1);
        }
    }

    #[test]
    fn test_length_checks() {
        let store = chain();
        let sampler = WalkSampler::new(&store);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(sampler.sample(0, &mut rng), Err(WalkError::ZeroLength)));
        assert!(matches!(
            sampler.sample(4, &mut rng),
            Err(WalkError::InsufficientHyperedges {
                requested: 4,
                available: 3
            })
        ));
        assert!(matches!(
            sampler.sample_from(3, 1, &mut rng),
            Err(WalkError::UnknownHyperedge { hyperedge: 3, .. })
        ));
    }

    #[test]
    fn test_degenerate_start_gets_stuck() {
        // {0,1} is degenerate and no other hyperedge touches it.
        let store =
            HypergraphStore::build([vec![1i64, 2], vec![3, 4], vec![4, 5]], &[1; 5]).unwrap();
        let sampler = WalkSampler::new(&store);
        let mut rng = StdRng::seed_from_u64(7);
        let err = sampler.sample_from(0, 2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            WalkError::WalkStuck {
                selected: 1,
                requested: 2,
                ..
            }
        ));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_single_hyperedge_walk() {
        let store = HypergraphStore::build([vec![1i64]], &[1]).unwrap();
        let sampler = WalkSampler::new(&store);
        let mut rng = StdRng::seed_from_u64(3);
        let walk = sampler.sample(1, &mut rng).unwrap();
        assert_eq!(walk.selected_hyperedges(), &[0]);
        assert_eq!(walk.num_vertices(), 1);
    }

    #[test]
    fn test_retry_gives_up_when_every_walk_sticks() {
        // Two disjoint hyperedges: any walk of length 2 is stuck.
        let store = HypergraphStore::build([vec![1i64, 2], vec![3, 4]], &[1; 4]).unwrap();
        let sampler = WalkSampler::new(&store);
        let mut rng = StdRng::seed_from_u64(11);
        let err = sampler.sample_with_retry(2, 5, &mut rng).unwrap_err();
        assert!(matches!(err, WalkError::WalkStuck { .. }));
    }

    #[test]
    fn test_retry_does_not_retry_insufficient() {
        let store = chain();
        let sampler = WalkSampler::new(&store);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            sampler.sample_with_retry(10, 100, &mut rng),
            Err(WalkError::InsufficientHyperedges { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_walk() {
        let store = chain();
        let sampler = WalkSampler::new(&store);
        let a = sampler.sample_with_retry(2, 10, &mut StdRng::seed_from_u64(42));
        let b = sampler.sample_with_retry(2, 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(
            a.map(|w| w.selected_hyperedges().to_vec()).ok(),
            b.map(|w| w.selected_hyperedges().to_vec()).ok()
        );
    }
}
