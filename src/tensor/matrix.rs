//! Two-dimensional device container

use super::{Fillable, MemoryOrder, RawBuffer, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Dense device matrix in row-major or column-major order
pub struct Matrix<R: Runtime> {
    storage: Storage<R>,
    shape: [usize; 2],
    order: MemoryOrder,
}

impl<R: Runtime> Matrix<R> {
    /// Zero-filled `rows x cols` matrix
    pub fn zeros(
        rows: usize,
        cols: usize,
        dtype: DType,
        order: MemoryOrder,
        device: &R::Device,
    ) -> Result<Self> {
        let numel = rows
            .checked_mul(cols)
            .ok_or(Error::OutOfMemory { size: usize::MAX })?;
        Ok(Self {
            storage: Storage::zeros(numel, dtype, device)?,
            shape: [rows, cols],
            order,
        })
    }

    /// Matrix holding a copy of `data`, which is laid out in `order`
    pub fn from_slice<T: Element>(
        data: &[T],
        rows: usize,
        cols: usize,
        order: MemoryOrder,
        device: &R::Device,
    ) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::shape_mismatch(&[rows, cols], &[data.len()]));
        }
        Ok(Self {
            storage: Storage::from_slice(data, device)?,
            shape: [rows, cols],
            order,
        })
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Memory order of the elements
    #[inline]
    pub fn order(&self) -> MemoryOrder {
        self.order
    }

    /// Linear offset of element `(row, col)` in storage
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        match self.order {
            MemoryOrder::RowMajor => row * self.cols() + col,
            MemoryOrder::ColumnMajor => col * self.rows() + row,
        }
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

    /// Copy the elements to the host in storage order
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.storage.to_vec()
    }

    /// Copy the elements to the host as nested rows
    pub fn to_rows<T: Element>(&self) -> Result<Vec<Vec<T>>> {
        let flat = self.to_vec::<T>()?;
        Ok((0..self.rows())
            .map(|r| (0..self.cols()).map(|c| flat[self.offset(r, c)]).collect())
            .collect())
    }

    /// Overwrite the elements from host data laid out in this matrix's order
    pub fn copy_from_slice<T: Element>(&mut self, data: &[T]) -> Result<()> {
        self.storage.copy_from_slice(data)
    }
}

impl<R: Runtime> Fillable<R> for Matrix<R> {
    fn numel(&self) -> usize {
        self.storage.len()
    }

    fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn memory_order(&self) -> MemoryOrder {
        self.order
    }

    fn device(&self) -> &R::Device {
        self.storage.device()
    }

    fn as_raw(&self) -> RawBuffer {
        self.storage.as_raw()
    }
}

impl<R: Runtime> std::fmt::Debug for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape)
            .field("order", &self.order)
            .field("dtype", &self.dtype())
            .field("device", self.device())
            .finish()
    }
}
