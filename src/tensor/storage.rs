//! Storage: exclusively owned device memory

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Device memory holding `len` elements of one dtype
///
/// Each container owns its storage outright; memory is released when the
/// storage is dropped. Random fills write through `&mut` access, so no two
/// operations can target the same buffer concurrently.
pub struct Storage<R: Runtime> {
    /// Raw device pointer (GPU address or CPU ptr cast to u64)
    ptr: u64,
    /// Number of elements (not bytes)
    len: usize,
    dtype: DType,
    device: R::Device,
}

impl<R: Runtime> Storage<R> {
    /// Allocate zero-initialized storage for `len` elements of `dtype`
    pub fn zeros(len: usize, dtype: DType, device: &R::Device) -> Result<Self> {
        let size_bytes = len
            .checked_mul(dtype.size_in_bytes())
            .ok_or(Error::OutOfMemory { size: usize::MAX })?;
        let ptr = R::allocate(size_bytes, device)?;

        Ok(Self {
            ptr,
            len,
            dtype,
            device: device.clone(),
        })
    }

    /// Allocate storage and copy `data` into it; the dtype follows `T`
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let ptr = R::allocate(bytes.len(), device)?;
        let storage = Self {
            ptr,
            len: data.len(),
            dtype: T::DTYPE,
            device: device.clone(),
        };
        // On copy failure the storage drops and frees the allocation.
        R::copy_to_device(bytes, storage.ptr, device)?;
        Ok(storage)
    }

    /// Get the raw device pointer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.ptr
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.device
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.len * self.dtype.size_in_bytes()
    }

    /// Get as raw buffer for passing to kernels
    #[inline]
    pub fn as_raw(&self) -> RawBuffer {
        RawBuffer::new(self.ptr, self.len, self.dtype)
    }

    fn check_host_type<T: Element>(&self) -> Result<()> {
        if T::DTYPE != self.dtype {
            return Err(Error::DTypeMismatch {
                container: self.dtype,
                host: T::DTYPE,
            });
        }
        Ok(())
    }

    /// Copy the contents to the host
    ///
    /// `T` must match the storage dtype.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.check_host_type::<T>()?;
        // Allocate as T so the destination is aligned for T, then copy bytes.
        let mut result = vec![T::zero(); self.len];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        R::copy_from_device(self.ptr, bytes, &self.device)?;
        Ok(result)
    }

    /// Overwrite the contents from host data of the same length and dtype
    pub fn copy_from_slice<T: Element>(&mut self, data: &[T]) -> Result<()> {
        self.check_host_type::<T>()?;
        if data.len() != self.len {
            return Err(Error::shape_mismatch(&[self.len], &[data.len()]));
        }
        R::copy_to_device(bytemuck::cast_slice(data), self.ptr, &self.device)
    }
}

impl<R: Runtime> Drop for Storage<R> {
    fn drop(&mut self) {
        if self.ptr != 0 {
            R::deallocate(self.ptr, self.size_in_bytes(), &self.device);
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &format!("0x{:x}", self.ptr))
            .field("len", &self.len)
            .field("dtype", &self.dtype)
            .field("device", &self.device)
            .finish()
    }
}

/// Raw buffer for passing to kernels
///
/// Plain data with no lifetime, carrying everything a kernel launch needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawBuffer {
    /// Device pointer
    pub ptr: u64,
    /// Number of elements
    pub len: usize,
    /// Element type
    pub dtype: DType,
}

impl RawBuffer {
    /// Create a new raw buffer
    #[inline]
    pub const fn new(ptr: u64, len: usize, dtype: DType) -> Self {
        Self { ptr, len, dtype }
    }

    /// Size in bytes
    #[inline]
    pub const fn size_in_bytes(&self) -> usize {
        self.len * self.dtype.size_in_bytes()
    }
}
