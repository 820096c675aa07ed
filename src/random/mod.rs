//! Random number generation into device containers
//!
//! Generation is counter-based: a [`SeedManager`] owns one base seed and a
//! table of per-stream Philox keys, and every draw is a pure function of
//! (stream key, launch epoch, element index). Parallel workers never share
//! mutable generator state and results do not depend on the thread count.
//!
//! The free functions here use [`SeedManager::global`] and the default client
//! of the container's device:
//!
//! ```ignore
//! use devrand::prelude::*;
//!
//! random::initialize_seeds()?;
//! let device = CpuRuntime::default_device();
//! let mut v = Vector::<CpuRuntime>::zeros(1024, DType::F32, &device)?;
//! random::fill_uniform::<CpuRuntime, _>(&mut v)?;
//! ```
//!
//! To keep seed state out of process globals, create a `SeedManager` and call
//! the [`RandomFillOps`] methods on a client directly.

mod config;
pub mod distribution;
mod philox;
mod seed;

pub use config::{
    DEFAULT_STREAMS, ENV_LAZY_INIT, ENV_SEED, ENV_STREAMS, MAX_STREAMS, SeedConfig,
    UninitializedPolicy,
};
pub use distribution::Distribution;
pub use philox::philox4x32_10;
pub use seed::{EntropySource, FixedSeed, Launch, OsEntropy, SeedManager, SeedState};

use crate::error::Result;
use crate::ops::RandomFillOps;
use crate::runtime::Runtime;
use crate::tensor::Fillable;

/// Seed the process-wide generator
///
/// Call once at startup. Calling again re-seeds, after which earlier draws
/// can no longer be reproduced from the new state.
pub fn initialize_seeds() -> Result<()> {
    SeedManager::global().initialize()
}

/// Overwrite every element with an independent Uniform[0, 1) draw
pub fn fill_uniform<R, C>(container: &mut C) -> Result<()>
where
    R: Runtime,
    R::Client: RandomFillOps<R>,
    C: Fillable<R>,
{
    let client = R::default_client(container.device());
    client.fill_uniform(SeedManager::global(), container)
}

/// Overwrite every element with an independent standard normal draw
pub fn fill_normal<R, C>(container: &mut C) -> Result<()>
where
    R: Runtime,
    R::Client: RandomFillOps<R>,
    C: Fillable<R>,
{
    let client = R::default_client(container.device());
    client.fill_normal(SeedManager::global(), container)
}

/// Replace each probability with an independent 0/1 draw
pub fn binarize<R, C>(container: &mut C) -> Result<()>
where
    R: Runtime,
    R::Client: RandomFillOps<R>,
    C: Fillable<R>,
{
    let client = R::default_client(container.device());
    client.binarize(SeedManager::global(), container)
}

/// Write an independent 0/1 draw for each probability in `probs` into `out`
pub fn binarize_into<R, P, O>(probs: &P, out: &mut O) -> Result<()>
where
    R: Runtime,
    R::Client: RandomFillOps<R>,
    P: Fillable<R>,
    O: Fillable<R>,
{
    let client = R::default_client(probs.device());
    client.binarize_into(SeedManager::global(), probs, out)
}
