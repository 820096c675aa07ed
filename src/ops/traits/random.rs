//! Random fill operations.
//!
//! This module defines the `RandomFillOps` trait for overwriting existing
//! device containers with random draws.

use crate::error::Result;
use crate::random::SeedManager;
use crate::runtime::Runtime;
use crate::tensor::Fillable;

/// Random fill operations on caller-owned containers
///
/// Every operation validates dtype, device, shape and seed state before
/// writing anything, so on `Err` the container is unchanged. On `Ok` every
/// element has been overwritten and the work is complete: operations block
/// until the device has finished.
///
/// Each call takes a fresh launch epoch from `seeds`, so two calls never
/// reuse random streams.
pub trait RandomFillOps<R: Runtime> {
    /// Overwrite every element with an independent Uniform[0, 1) draw
    ///
    /// # Errors
    ///
    /// - `UnsupportedDType` if the container is not floating point
    /// - `DeviceMismatch` if the container is not on this client's device
    /// - `UninitializedState` if `seeds` is uninitialized and strict
    fn fill_uniform<C: Fillable<R>>(&self, seeds: &SeedManager, container: &mut C) -> Result<()>;

    /// Overwrite every element with an independent standard normal draw
    ///
    /// Errors as for [`fill_uniform`](Self::fill_uniform).
    fn fill_normal<C: Fillable<R>>(&self, seeds: &SeedManager, container: &mut C) -> Result<()>;

    /// Replace each probability `p` with 1 (with probability `p`) or 0
    ///
    /// Probabilities outside [0, 1] are clamped and NaN counts as 0, so
    /// `p <= 0` always yields 0 and `p >= 1` always yields 1.
    ///
    /// Errors as for [`fill_uniform`](Self::fill_uniform).
    fn binarize<C: Fillable<R>>(&self, seeds: &SeedManager, container: &mut C) -> Result<()>;

    /// Write a Bernoulli draw for each probability in `probs` into `out`
    ///
    /// `out` must have the same shape and memory order as `probs` and may
    /// hold any dtype; integer outputs receive 0 and 1.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDType` if `probs` is not floating point
    /// - `ShapeMismatch` if the shapes or memory orders differ
    /// - `DeviceMismatch` if either container is on another device
    /// - `UninitializedState` if `seeds` is uninitialized and strict
    fn binarize_into<P: Fillable<R>, O: Fillable<R>>(
        &self,
        seeds: &SeedManager,
        probs: &P,
        out: &mut O,
    ) -> Result<()>;
}
