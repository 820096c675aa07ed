//! CUDA runtime implementation
//!
//! GPU backend via NVIDIA CUDA using cudarc.
//!
//! - `CudaDevice` - Represents a CUDA GPU device
//! - `CudaClient` - Owns the context and stream, launches kernels
//! - `CudaRuntime` - Implements the generic Runtime trait
//!
//! Memory is allocated stream-ordered (`cuMemAllocAsync`) and zeroed on the
//! same stream. Random kernels are compiled to PTX by `build.rs`.
//! Half-precision containers are not supported by the CUDA random kernels.

mod cache;
mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::CudaClient;
pub use device::CudaDevice;
pub use runtime::CudaRuntime;

/// Whether a CUDA driver with at least one device is present
pub fn is_cuda_available() -> bool {
    device::device_count().map(|n| n > 0).unwrap_or(false)
}
