//! Operations on device containers
//!
//! Operations are defined as traits implemented by each runtime's client,
//! so an operation runs on the device the client is bound to.
//!
//! ```text
//! RuntimeClient<R>
//!   └── implements RandomFillOps<R>
//!         ├── fill_uniform, fill_normal (distribution fills)
//!         └── binarize, binarize_into   (Bernoulli draws from probabilities)
//! ```
//!
//! # Implementing Operations for a New Backend
//!
//! 1. Implement `RandomFillOps<YourRuntime>` for your `Client` type.
//! 2. Validate with the helpers in `random_common` before taking a launch
//!    from the `SeedManager`, so a rejected call leaves the container and the
//!    seed state untouched.
//! 3. Synchronize before returning.

mod dispatch;
pub(crate) mod random_common;
mod traits;

pub(crate) mod cpu;

#[cfg(feature = "cuda")]
pub(crate) mod cuda;

pub use traits::RandomFillOps;
