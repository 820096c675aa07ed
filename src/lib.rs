//! # devrand
//!
//! **Parallel random number generation into device-resident vectors and matrices.**
//!
//! devrand fills caller-owned containers on a compute device (the host CPU,
//! or an NVIDIA GPU with the `cuda` feature) with independent draws from
//! Uniform[0, 1) and N(0, 1), and turns probability containers into 0/1
//! outcomes. It also answers device questions: how many devices there are,
//! which one is current, and how much memory each has free.
//!
//! ## Design
//!
//! - **Counter-based streams**: draws come from Philox4x32-10 keyed by
//!   per-stream sub-seeds, so every element is a pure function of
//!   (seed, launch, index) and results are identical for any thread count.
//! - **Explicit seed state**: a `SeedManager` owns the generator state. A
//!   process-wide instance backs the free functions in [`random`].
//! - **Validate first**: dtype, device, shape and seed checks run before any
//!   element is written.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use devrand::prelude::*;
//!
//! let seeds = SeedManager::new();
//! seeds.initialize()?;
//!
//! let device = CpuRuntime::default_device();
//! let client = CpuRuntime::default_client(&device);
//!
//! let mut m = Matrix::<CpuRuntime>::zeros(64, 32, DType::F64, MemoryOrder::ColumnMajor, &device)?;
//! client.fill_normal(&seeds, &mut m)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded CPU kernels
//! - `cuda`: NVIDIA CUDA backend
//! - `f16`: Half-precision floats (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod random;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::RandomFillOps;
    pub use crate::random::{self, SeedConfig, SeedManager, UninitializedPolicy};
    pub use crate::runtime::{Device, DeviceContext, MemoryInfo, Runtime, RuntimeClient};
    pub use crate::tensor::{Fillable, Matrix, MemoryOrder, Vector};

    pub use crate::runtime::cpu::{CpuRuntime, ParallelismConfig};

    #[cfg(feature = "cuda")]
    pub use crate::runtime::cuda::CudaRuntime;
}

/// Default runtime based on enabled features
///
/// - With `cuda` feature: `CudaRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "cuda")]
pub type DefaultRuntime = runtime::cuda::CudaRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "cuda"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
