//! Device selection and memory status queries
//!
//! `DeviceContext` holds the "current device" that operations without an
//! explicit device run on. The free functions query any device by index
//! without touching that selection.
//!
//! # Concurrency
//!
//! The current device is shared mutable state. Switching it while an
//! operation issued against the previous device is still running is the
//! caller's responsibility: serialize `set_device` against in-flight work.
//! Random fills block until complete, so this only matters when fills run
//! on other threads.

use super::{Device, MemoryInfo, Runtime};
use crate::error::Result;
use parking_lot::RwLock;

/// Device index used when none is given
pub const DEFAULT_DEVICE_INDEX: usize = 0;

/// Number of devices the runtime can address
pub fn count_devices<R: Runtime>() -> Result<usize> {
    R::device_count()
}

/// Memory status of the device at `index`
pub fn memory_info<R: Runtime>(index: usize) -> Result<MemoryInfo> {
    let device = R::device(index)?;
    R::memory_info(&device)
}

/// Free memory of the device at `index`, in bytes
pub fn free_memory<R: Runtime>(index: usize) -> Result<u64> {
    Ok(memory_info::<R>(index)?.free)
}

/// Total memory of the device at `index`, in bytes
pub fn max_memory<R: Runtime>(index: usize) -> Result<u64> {
    Ok(memory_info::<R>(index)?.total)
}

/// Current-device selection for one runtime
pub struct DeviceContext<R: Runtime> {
    current: RwLock<R::Device>,
}

impl<R: Runtime> DeviceContext<R> {
    /// Create a context selecting `DEFAULT_DEVICE_INDEX`
    ///
    /// Fails with `InvalidDevice` when the runtime reports no devices.
    pub fn new() -> Result<Self> {
        Self::with_device(DEFAULT_DEVICE_INDEX)
    }

    /// Create a context selecting the device at `index`
    pub fn with_device(index: usize) -> Result<Self> {
        let device = R::device(index)?;
        Ok(Self {
            current: RwLock::new(device),
        })
    }

    /// Number of devices the runtime can address
    pub fn count_devices(&self) -> Result<usize> {
        R::device_count()
    }

    /// Select the device at `index` as current
    ///
    /// Returns `InvalidDevice` and keeps the previous selection if `index`
    /// is out of range.
    pub fn set_device(&self, index: usize) -> Result<()> {
        let device = R::device(index)?;
        tracing::debug!(
            runtime = R::name(),
            device = %device.name(),
            "selected device"
        );
        *self.current.write() = device;
        Ok(())
    }

    /// The currently selected device
    pub fn current_device(&self) -> R::Device {
        self.current.read().clone()
    }

    /// Index of the currently selected device
    pub fn current_index(&self) -> usize {
        self.current.read().id()
    }

    /// Memory status of the device at `index`
    pub fn memory_info(&self, index: usize) -> Result<MemoryInfo> {
        memory_info::<R>(index)
    }

    /// Free memory of the device at `index`, in bytes
    pub fn free_memory(&self, index: usize) -> Result<u64> {
        free_memory::<R>(index)
    }

    /// Total memory of the device at `index`, in bytes
    pub fn max_memory(&self, index: usize) -> Result<u64> {
        max_memory::<R>(index)
    }

    /// Client dispatching to the current device
    pub fn client(&self) -> R::Client {
        R::default_client(&self.current_device())
    }
}

impl<R: Runtime> std::fmt::Debug for DeviceContext<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceContext")
            .field("runtime", &R::name())
            .field("current", &*self.current.read())
            .finish()
    }
}
