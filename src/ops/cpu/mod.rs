//! CPU implementation of container operations.

pub mod random;
