//! CPU runtime implementation

use super::client::CpuClient;
use super::device::CpuDevice;
use super::memory;
use crate::error::{Error, Result};
use crate::runtime::{MemoryInfo, Runtime};
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};

// AVX-512 alignment
const ALIGN: usize = 64;

/// CPU compute runtime
///
/// This is the default runtime that works on any platform.
/// Memory is allocated on the heap using the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;

    fn name() -> &'static str {
        "cpu"
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let layout = AllocLayout::from_size_align(size_bytes, ALIGN)
            .map_err(|_| Error::OutOfMemory { size: size_bytes })?;

        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc_zeroed(layout) };

        if ptr.is_null() {
            return Err(Error::OutOfMemory { size: size_bytes });
        }

        Ok(ptr as u64)
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        // Same layout that allocate() accepted for this size.
        if let Ok(layout) = AllocLayout::from_size_align(size_bytes, ALIGN) {
            unsafe {
                dealloc(ptr as *mut u8, layout);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    fn device_count() -> Result<usize> {
        Ok(1)
    }

    fn device_unchecked(_index: usize) -> Self::Device {
        CpuDevice::new()
    }

    fn memory_info(_device: &Self::Device) -> Result<MemoryInfo> {
        memory::host_memory_info()
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Device;

    #[test]
    fn test_cpu_allocate_zeroed() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(256, &device).unwrap();
        assert_ne!(ptr, 0);
        assert_eq!(ptr as usize % ALIGN, 0);

        let mut host = [0xFFu8; 256];
        CpuRuntime::copy_from_device(ptr, &mut host, &device).unwrap();
        assert!(host.iter().all(|&b| b == 0));

        CpuRuntime::deallocate(ptr, 256, &device);
    }

    #[test]
    fn test_cpu_zero_size_allocation() {
        let device = CpuDevice::new();
        assert_eq!(CpuRuntime::allocate(0, &device).unwrap(), 0);
        CpuRuntime::deallocate(0, 0, &device);
    }

    #[test]
    fn test_cpu_copy_roundtrip() {
        let device = CpuDevice::new();
        let data = [1u8, 2, 3, 4, 5];
        let ptr = CpuRuntime::allocate(data.len(), &device).unwrap();
        CpuRuntime::copy_to_device(&data, ptr, &device).unwrap();
        let mut back = [0u8; 5];
        CpuRuntime::copy_from_device(ptr, &mut back, &device).unwrap();
        assert_eq!(back, data);
        CpuRuntime::deallocate(ptr, data.len(), &device);
    }

    #[test]
    fn test_cpu_single_device() {
        assert_eq!(CpuRuntime::device_count().unwrap(), 1);
        assert_eq!(CpuRuntime::device(0).unwrap().id(), 0);
        let err = CpuRuntime::device(1).unwrap_err();
        assert!(matches!(err, Error::InvalidDevice { index: 1, count: 1 }));
    }
}
