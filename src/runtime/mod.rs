//! Runtime backends for device containers
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the CPU and (behind the `cuda` feature) CUDA backends.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, memory, device enumeration)
//! ├── Device (identifies a specific GPU/CPU)
//! ├── Client (dispatches operations, owns stream / thread pool)
//! └── DeviceContext (current-device selection, memory queries)
//! ```

mod context;
mod traits;

pub mod cpu;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use context::{
    DEFAULT_DEVICE_INDEX, DeviceContext, count_devices, free_memory, max_memory, memory_info,
};
pub use traits::{Device, MemoryInfo, Runtime, RuntimeClient};
