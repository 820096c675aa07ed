//! CPU runtime implementation
//!
//! The CPU runtime uses aligned heap allocation and runs random kernels on
//! a rayon thread pool (with the `rayon` feature). It exposes exactly one
//! device, the host.

mod client;
mod device;
pub(crate) mod kernels;
mod memory;
mod runtime;

pub use client::{CpuClient, DEFAULT_CHUNK_SIZE, ParallelismConfig};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
