//! CPU kernel implementations
//!
//! Low-level compute kernels for CPU operations, generic over `T: Element`.

pub mod random;

pub use random::{bernoulli_inplace_kernel, bernoulli_kernel, normal_kernel, uniform_kernel};
