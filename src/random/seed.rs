//! Seed state shared by every random operation
//!
//! A [`SeedManager`] draws one 64-bit base seed from an [`EntropySource`] and
//! derives from it a table of per-stream keys. Each random operation takes a
//! [`Launch`]: a snapshot of the current keys plus a fresh epoch number.
//! Element `i` of a launch reads stream `i % streams` at local counter
//! `i / streams`, so the value written to an element depends only on
//! (base seed, epoch, i) and never on how the work is split across threads.
//!
//! # Concurrency
//!
//! The state is published through a `RwLock<Option<Arc<SeedState>>>`.
//! `initialize` builds a complete state before swapping it in, so a launch
//! sees either the old state or the new one and never a partial table.
//! Epochs come from an atomic counter inside each state, so concurrent
//! launches never share counter space.

use super::config::{SeedConfig, UninitializedPolicy};
use super::philox;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of base seeds
pub trait EntropySource: Send + Sync {
    /// Short name used in log records
    fn name(&self) -> &'static str;

    /// Draw a 64-bit seed
    ///
    /// Returns `Err(Initialization)` when the source is unavailable.
    fn next_seed(&self) -> Result<u64>;
}

/// Operating-system entropy (`getrandom` underneath `rand::rngs::OsRng`)
#[derive(Copy, Clone, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn name(&self) -> &'static str {
        "os"
    }

    fn next_seed(&self) -> Result<u64> {
        use rand::TryRngCore;
        rand::rngs::OsRng
            .try_next_u64()
            .map_err(|e| Error::initialization(format!("OS entropy source unavailable: {}", e)))
    }
}

/// A constant seed, for reproducible runs
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedSeed(pub u64);

impl EntropySource for FixedSeed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn next_seed(&self) -> Result<u64> {
        Ok(self.0)
    }
}

/// SplitMix64 finaliser: a bijection on u64 with full avalanche
#[inline]
pub(crate) fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Key of stream `unit` under `base_seed`
///
/// Composition of bijections in `unit`, so distinct streams never share a key.
#[inline]
fn derive_stream_key(base_seed: u64, unit: u64) -> u64 {
    splitmix64(base_seed ^ splitmix64(unit))
}

/// One seeded generation of per-stream keys
#[derive(Debug)]
pub struct SeedState {
    base_seed: u64,
    generation: u64,
    keys: Box<[u64]>,
    epochs: AtomicU64,
}

impl SeedState {
    fn derive(base_seed: u64, streams: usize, generation: u64) -> Self {
        let keys = (0..streams.max(1) as u64)
            .map(|unit| derive_stream_key(base_seed, unit))
            .collect();
        Self {
            base_seed,
            generation,
            keys,
            epochs: AtomicU64::new(0),
        }
    }

    /// The base seed drawn at initialization
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// How many initializations preceded and produced this state (1-based)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of parallel sub-streams
    pub fn streams(&self) -> usize {
        self.keys.len()
    }

    /// Per-stream Philox keys
    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    /// Number of launches issued against this state so far
    pub fn launches(&self) -> u64 {
        self.epochs.load(Ordering::Relaxed)
    }
}

/// Seed snapshot for a single random operation
#[derive(Clone, Debug)]
pub struct Launch {
    state: Arc<SeedState>,
    epoch: u64,
}

impl Launch {
    /// Epoch reserved for this launch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Per-stream keys of the state this launch was taken from
    pub fn keys(&self) -> &[u64] {
        self.state.keys()
    }

    /// Number of parallel sub-streams
    pub fn streams(&self) -> usize {
        self.state.streams()
    }

    /// Random words for element `index`
    #[inline(always)]
    pub fn block(&self, index: usize) -> [u32; 4] {
        let keys = self.state.keys();
        let streams = keys.len();
        philox::block(keys[index % streams], (index / streams) as u64, self.epoch)
    }
}

/// Owner of the generator state for all random operations
///
/// Create one per process or per test; [`SeedManager::global`] holds the
/// instance the free functions in [`crate::random`] use.
pub struct SeedManager {
    config: SeedConfig,
    entropy: Box<dyn EntropySource>,
    state: RwLock<Option<Arc<SeedState>>>,
    generations: AtomicU64,
}

static GLOBAL: OnceLock<SeedManager> = OnceLock::new();

impl SeedManager {
    /// Manager with default configuration and OS entropy
    pub fn new() -> Self {
        Self::with_config(SeedConfig::default())
    }

    /// Manager with the given configuration
    ///
    /// Uses `FixedSeed` when the configuration carries a seed, OS entropy
    /// otherwise.
    pub fn with_config(config: SeedConfig) -> Self {
        let entropy: Box<dyn EntropySource> = match config.seed() {
            Some(seed) => Box::new(FixedSeed(seed)),
            None => Box::new(OsEntropy),
        };
        Self::with_entropy(config, entropy)
    }

    /// Manager with an explicit entropy source
    pub fn with_entropy(config: SeedConfig, entropy: Box<dyn EntropySource>) -> Self {
        Self {
            config,
            entropy,
            state: RwLock::new(None),
            generations: AtomicU64::new(0),
        }
    }

    /// Process-wide manager, configured from `DEVRAND_*` environment variables
    pub fn global() -> &'static SeedManager {
        GLOBAL.get_or_init(|| Self::with_config(SeedConfig::from_env()))
    }

    /// Configuration this manager was built with
    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Number of parallel sub-streams per state
    pub fn streams(&self) -> usize {
        self.config.streams()
    }

    /// Draw a fresh base seed and derive all stream keys
    ///
    /// Calling again replaces the previous state; launches already in flight
    /// keep the snapshot they took. On failure the previous state (if any)
    /// stays in place.
    pub fn initialize(&self) -> Result<()> {
        let state = self.draw_state()?;
        let mut slot = self.state.write();
        self.publish(&mut slot, state);
        Ok(())
    }

    /// Draw a base seed and derive the key table, outside any lock
    fn draw_state(&self) -> Result<SeedState> {
        let base_seed = self.entropy.next_seed()?;
        Ok(SeedState::derive(base_seed, self.config.streams(), 0))
    }

    /// Stamp `state` with the next generation and make it current
    ///
    /// The caller holds the write lock, so generations grow in publication
    /// order.
    fn publish(&self, slot: &mut Option<Arc<SeedState>>, mut state: SeedState) -> Arc<SeedState> {
        state.generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let state = Arc::new(state);
        let source = self.entropy.name();
        if slot.is_some() {
            tracing::info!(
                source,
                generation = state.generation(),
                streams = state.streams(),
                "re-seeded random streams"
            );
        } else {
            tracing::debug!(
                source,
                generation = state.generation(),
                streams = state.streams(),
                "seeded random streams"
            );
        }
        *slot = Some(Arc::clone(&state));
        state
    }

    /// Whether `initialize` has succeeded at least once
    pub fn is_initialized(&self) -> bool {
        self.state.read().is_some()
    }

    /// Base seed of the current state
    pub fn base_seed(&self) -> Option<u64> {
        self.state.read().as_ref().map(|s| s.base_seed())
    }

    /// Generation of the current state (1 after the first `initialize`)
    pub fn generation(&self) -> Option<u64> {
        self.state.read().as_ref().map(|s| s.generation())
    }

    /// Current state, if initialized
    pub fn state(&self) -> Option<Arc<SeedState>> {
        self.state.read().clone()
    }

    /// Drop the current state, returning to uninitialized
    pub fn reset(&self) {
        if self.state.write().take().is_some() {
            tracing::debug!("cleared random stream state");
        }
    }

    /// Reserve an epoch for operation `op`
    ///
    /// Under `UninitializedPolicy::Lazy` an uninitialized manager seeds
    /// itself first; under `Strict` this fails with `UninitializedState`.
    pub(crate) fn launch(&self, op: &'static str) -> Result<Launch> {
        let state = match self.state() {
            Some(state) => state,
            None => match self.config.policy() {
                UninitializedPolicy::Strict => return Err(Error::UninitializedState { op }),
                UninitializedPolicy::Lazy => self.initialize_lazily(op)?,
            },
        };
        let epoch = state.epochs.fetch_add(1, Ordering::Relaxed);
        Ok(Launch { state, epoch })
    }

    fn initialize_lazily(&self, op: &'static str) -> Result<Arc<SeedState>> {
        let mut slot = self.state.write();
        if let Some(state) = slot.as_ref() {
            return Ok(Arc::clone(state));
        }
        tracing::warn!(op, "random operation before seeding, initializing lazily");
        let state = self.draw_state()?;
        Ok(self.publish(&mut slot, state))
    }
}

impl Default for SeedManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SeedManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedManager")
            .field("config", &self.config)
            .field("entropy", &self.entropy.name())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn next_seed(&self) -> Result<u64> {
            Err(Error::initialization("no entropy"))
        }
    }

    #[test]
    fn test_stream_keys_distinct() {
        let state = SeedState::derive(7, 4096, 1);
        let unique: HashSet<u64> = state.keys().iter().copied().collect();
        assert_eq!(unique.len(), 4096);
    }

    #[test]
    fn test_stream_keys_depend_on_base_seed() {
        let a = SeedState::derive(1, 16, 1);
        let b = SeedState::derive(2, 16, 1);
        assert_ne!(a.keys(), b.keys());
    }

    #[test]
    fn test_strict_policy_rejects_launch() {
        let seeds = SeedManager::with_config(SeedConfig::new().with_seed(1));
        let err = seeds.launch("fill_uniform").unwrap_err();
        assert!(matches!(
            err,
            Error::UninitializedState {
                op: "fill_uniform"
            }
        ));
    }

    #[test]
    fn test_lazy_policy_initializes() {
        let seeds = SeedManager::with_config(
            SeedConfig::new()
                .with_seed(1)
                .with_policy(UninitializedPolicy::Lazy),
        );
        assert!(!seeds.is_initialized());
        let launch = seeds.launch("fill_normal").unwrap();
        assert!(seeds.is_initialized());
        assert_eq!(launch.epoch(), 0);
        assert_eq!(seeds.generation(), Some(1));
    }

    #[test]
    fn test_epochs_advance() {
        let seeds = SeedManager::with_config(SeedConfig::new().with_seed(3).with_streams(8));
        seeds.initialize().unwrap();
        let a = seeds.launch("a").unwrap();
        let b = seeds.launch("b").unwrap();
        assert_eq!(a.epoch(), 0);
        assert_eq!(b.epoch(), 1);
        assert_ne!(a.block(0), b.block(0));
    }

    #[test]
    fn test_failed_initialize_keeps_uninitialized() {
        let seeds = SeedManager::with_entropy(SeedConfig::new(), Box::new(FailingEntropy));
        let err = seeds.initialize().unwrap_err();
        assert!(matches!(err, Error::Initialization { .. }));
        assert!(!seeds.is_initialized());
    }

    #[test]
    fn test_reinitialize_bumps_generation() {
        let seeds = SeedManager::with_config(SeedConfig::new().with_seed(9).with_streams(4));
        seeds.initialize().unwrap();
        let launch = seeds.launch("x").unwrap();
        seeds.initialize().unwrap();
        assert_eq!(seeds.generation(), Some(2));
        // The old snapshot stays usable after the swap.
        assert_eq!(launch.streams(), 4);
        // A fresh state restarts its epochs.
        assert_eq!(seeds.launch("y").unwrap().epoch(), 0);
    }

    #[test]
    fn test_generation_follows_publication_order() {
        let seeds = SeedManager::with_config(SeedConfig::new().with_seed(4).with_streams(2));
        // Two initializations drawn concurrently, published in reverse order.
        let first = seeds.draw_state().unwrap();
        let second = seeds.draw_state().unwrap();

        let mut slot = seeds.state.write();
        let published = seeds.publish(&mut slot, second);
        assert_eq!(published.generation(), 1);
        let published = seeds.publish(&mut slot, first);
        assert_eq!(published.generation(), 2);
        drop(slot);

        assert_eq!(seeds.generation(), Some(2));
    }

    #[test]
    fn test_reset() {
        let seeds = SeedManager::with_config(SeedConfig::new().with_seed(9));
        seeds.initialize().unwrap();
        seeds.reset();
        assert!(!seeds.is_initialized());
        assert_eq!(seeds.base_seed(), None);
    }

    #[test]
    fn test_launch_block_matches_stream_layout() {
        let seeds = SeedManager::with_config(SeedConfig::new().with_seed(5).with_streams(3));
        seeds.initialize().unwrap();
        let launch = seeds.launch("x").unwrap();
        let keys = launch.keys().to_vec();
        assert_eq!(launch.block(7), philox::block(keys[1], 2, 0));
    }
}
