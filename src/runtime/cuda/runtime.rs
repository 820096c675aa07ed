//! CUDA runtime implementation

use super::cache::{
    is_cuda_context_valid, log_cuda_memory_error, try_get_cached_stream, try_get_or_create_client,
};
use super::client::CudaClient;
use super::device::{self, CudaDevice};
use crate::error::{Error, Result};
use crate::runtime::{MemoryInfo, Runtime};

/// CUDA Runtime adapter
///
/// Implements the generic Runtime trait for CUDA backend.
/// Uses cudarc for direct GPU control.
#[derive(Clone, Debug, Default)]
pub struct CudaRuntime;

impl Runtime for CudaRuntime {
    type Device = CudaDevice;
    type Client = CudaClient;

    fn name() -> &'static str {
        "cuda"
    }

    /// Allocate zeroed GPU memory, ordered on the device's stream.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let client = try_get_or_create_client(device)?;
        let cu_stream = client.stream.cu_stream();

        unsafe {
            let mut ptr: u64 = 0;
            let result = cudarc::driver::sys::cuMemAllocAsync(&mut ptr, size_bytes, cu_stream);
            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
                return Err(Error::OutOfMemory { size: size_bytes });
            }

            let result = cudarc::driver::sys::cuMemsetD8Async(ptr, 0, size_bytes, cu_stream);
            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
                let _ = cudarc::driver::sys::cuMemFreeAsync(ptr, cu_stream);
                return Err(Error::Backend(format!(
                    "Failed to zero {} bytes on device {} ({:?})",
                    size_bytes, device.index, result
                )));
            }

            Ok(ptr)
        }
    }

    fn deallocate(ptr: u64, _size_bytes: usize, device: &Self::Device) {
        if ptr == 0 {
            return;
        }

        unsafe {
            // Context already gone: the driver reclaims the memory on destruction.
            if !is_cuda_context_valid() {
                return;
            }

            let result = if let Some(stream) = try_get_cached_stream(device.index) {
                cudarc::driver::sys::cuMemFreeAsync(ptr, stream)
            } else {
                cudarc::driver::sys::cuMemFree_v2(ptr)
            };

            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS
                && result != cudarc::driver::sys::CUresult::CUDA_ERROR_ILLEGAL_ADDRESS
            {
                log_cuda_memory_error("cuMemFree", ptr, result);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        let client = try_get_or_create_client(device)?;

        unsafe {
            let result = cudarc::driver::sys::cuMemcpyHtoDAsync_v2(
                dst,
                src.as_ptr() as *const std::ffi::c_void,
                src.len(),
                client.stream.cu_stream(),
            );

            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
                return Err(Error::Backend(format!(
                    "Host-to-device copy failed: {} bytes ({:?})",
                    src.len(),
                    result
                )));
            }
        }

        client.try_synchronize()
    }

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        let client = try_get_or_create_client(device)?;

        unsafe {
            let result = cudarc::driver::sys::cuMemcpyDtoHAsync_v2(
                dst.as_mut_ptr() as *mut std::ffi::c_void,
                src,
                dst.len(),
                client.stream.cu_stream(),
            );

            if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
                return Err(Error::Backend(format!(
                    "Device-to-host copy failed: {} bytes ({:?})",
                    dst.len(),
                    result
                )));
            }
        }

        client.try_synchronize()
    }

    fn device_count() -> Result<usize> {
        device::device_count()
    }

    fn device_unchecked(index: usize) -> Self::Device {
        CudaDevice::new(index)
    }

    fn memory_info(device: &Self::Device) -> Result<MemoryInfo> {
        try_get_or_create_client(device)?.memory_info()
    }

    fn default_device() -> Self::Device {
        CudaDevice::new(0)
    }

    /// Cached client for `device`.
    ///
    /// # Panics
    ///
    /// Panics if the CUDA context for `device` cannot be created. Use
    /// `CudaRuntime::client` to get the error instead.
    fn default_client(device: &Self::Device) -> Self::Client {
        match try_get_or_create_client(device) {
            Ok(client) => client,
            Err(e) => panic!("[devrand::cuda] Failed to create CUDA client: {}", e),
        }
    }
}

impl CudaRuntime {
    /// Cached client for `device`, or the error that prevented creating it
    pub fn client(device: &CudaDevice) -> Result<CudaClient> {
        try_get_or_create_client(device)
    }
}
