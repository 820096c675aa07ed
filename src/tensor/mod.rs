//! Device-resident containers
//!
//! `Vector` and `Matrix` own a block of device memory of one dtype. Both
//! implement [`Fillable`], the capability the random operations require.

mod fillable;
mod matrix;
mod storage;
mod vector;

pub use fillable::{Fillable, MemoryOrder};
pub use matrix::Matrix;
pub use storage::{RawBuffer, Storage};
pub use vector::Vector;
