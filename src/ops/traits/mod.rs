//! Operation traits for device containers.
//!
//! Implementations are in the backend-specific modules (cpu/, cuda/).

mod random;

pub use random::RandomFillOps;
