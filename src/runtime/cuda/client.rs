//! CUDA Client implementation
//!
//! CudaClient owns stream and context for direct cudarc access.
//!
//! # Thread Safety
//!
//! `CudaClient` is `Clone` and can be shared across threads. The underlying
//! CUDA context and stream are reference-counted via `Arc`. CUDA operations
//! must be performed on the thread that owns the context or after calling
//! `context.bind_to_thread()`.

use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::CudaRuntime;
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::{MemoryInfo, RuntimeClient};

/// CUDA Runtime Client
///
/// Owns CUDA context and stream for direct kernel launches. All operations
/// launch on `self.stream()` so they execute in issue order.
#[derive(Clone)]
pub struct CudaClient {
    /// GPU device index
    pub(crate) device: CudaDevice,

    /// CUDA context for this device (owns GPU context)
    pub(crate) context: Arc<CudaContext>,

    /// Stream on which all kernels launch
    pub(crate) stream: Arc<CudaStream>,
}

impl std::fmt::Debug for CudaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaClient")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl CudaClient {
    /// Create a new CUDA client for a device.
    ///
    /// # Errors
    ///
    /// Returns an error if context creation fails (e.g., invalid device ID)
    /// or the stream cannot be created.
    pub fn new(device: CudaDevice) -> Result<Self> {
        let context = CudaContext::new(device.index).map_err(|e| {
            Error::Backend(format!(
                "Failed to create CUDA context for device {}: {:?}",
                device.index, e
            ))
        })?;

        context.bind_to_thread().map_err(|e| {
            Error::Backend(format!("Failed to bind CUDA context to thread: {:?}", e))
        })?;

        let stream = context
            .new_stream()
            .map_err(|e| Error::Backend(format!("Failed to create CUDA stream: {:?}", e)))?;

        tracing::debug!(device = device.index, "created CUDA client");

        Ok(Self {
            device,
            context,
            stream,
        })
    }

    /// Get reference to the CUDA stream.
    #[inline]
    pub fn stream(&self) -> &CudaStream {
        &self.stream
    }

    /// Get reference to the CUDA context.
    #[inline]
    pub fn context(&self) -> &Arc<CudaContext> {
        &self.context
    }

    /// Block until all work on this client's stream has finished
    pub fn try_synchronize(&self) -> Result<()> {
        self.stream.synchronize()?;
        Ok(())
    }

    /// Free and total memory of this client's device
    pub fn memory_info(&self) -> Result<MemoryInfo> {
        self.context.bind_to_thread()?;
        let (free, total) = cudarc::driver::result::mem_get_info()?;
        Ok(MemoryInfo::new(free as u64, total as u64))
    }
}

impl RuntimeClient<CudaRuntime> for CudaClient {
    fn device(&self) -> &CudaDevice {
        &self.device
    }

    fn synchronize(&self) {
        if let Err(e) = self.try_synchronize() {
            tracing::error!(device = self.device.index, error = %e, "CUDA stream synchronization failed");
        }
    }
}
