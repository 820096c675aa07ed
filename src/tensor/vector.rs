//! One-dimensional device container

use super::{Fillable, RawBuffer, Storage};
use crate::dtype::{DType, Element};
use crate::error::Result;
use crate::runtime::Runtime;

/// Contiguous device vector
pub struct Vector<R: Runtime> {
    storage: Storage<R>,
    shape: [usize; 1],
}

impl<R: Runtime> Vector<R> {
    /// Zero-filled vector of `len` elements
    pub fn zeros(len: usize, dtype: DType, device: &R::Device) -> Result<Self> {
        Ok(Self {
            storage: Storage::zeros(len, dtype, device)?,
            shape: [len],
        })
    }

    /// Vector holding a copy of `data`
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Result<Self> {
        Ok(Self {
            storage: Storage::from_slice(data, device)?,
            shape: [data.len()],
        })
    }

    /// Vector of `len` copies of `value`
    pub fn full<T: Element>(len: usize, value: T, device: &R::Device) -> Result<Self> {
        Self::from_slice(&vec![value; len], device)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.shape[0]
    }

    /// Whether the vector has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape[0] == 0
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Device holding the elements
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Copy the elements to the host
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.storage.to_vec()
    }

    /// Overwrite the elements from host data
    pub fn copy_from_slice<T: Element>(&mut self, data: &[T]) -> Result<()> {
        self.storage.copy_from_slice(data)
    }
}

impl<R: Runtime> Fillable<R> for Vector<R> {
    fn numel(&self) -> usize {
        self.len()
    }

    fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn device(&self) -> &R::Device {
        self.storage.device()
    }

    fn as_raw(&self) -> RawBuffer {
        self.storage.as_raw()
    }
}

impl<R: Runtime> std::fmt::Debug for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len())
            .field("dtype", &self.dtype())
            .field("device", self.device())
            .finish()
    }
}
