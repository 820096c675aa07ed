//! CUDA kernel launchers
//!
//! Kernel sources (`*.cu`) live next to this module and are compiled to PTX
//! by `build.rs`.

mod loader;
mod random;

pub use random::{FillKernel, launch_philox_binarize_into, launch_philox_fill};
