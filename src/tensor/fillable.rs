//! The container capability random operations are written against

use super::RawBuffer;
use crate::dtype::DType;
use crate::runtime::Runtime;

/// Element layout of a two-dimensional container
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemoryOrder {
    /// Rows are contiguous
    #[default]
    RowMajor,
    /// Columns are contiguous
    ColumnMajor,
}

/// A device container whose elements random operations can write
///
/// Random fills treat a container as a flat run of `numel()` elements:
/// every element is drawn independently, so the memory order never changes
/// the distribution. It only matters when two containers are paired
/// element-by-element (`binarize_into`).
pub trait Fillable<R: Runtime> {
    /// Total number of elements
    fn numel(&self) -> usize;

    /// Element type
    fn dtype(&self) -> DType;

    /// Logical shape
    fn shape(&self) -> &[usize];

    /// Memory order of the elements
    fn memory_order(&self) -> MemoryOrder {
        MemoryOrder::RowMajor
    }

    /// Device holding the elements
    fn device(&self) -> &R::Device;

    /// Raw buffer covering all `numel()` elements
    fn as_raw(&self) -> RawBuffer;
}
