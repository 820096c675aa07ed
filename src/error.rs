//! Error types for devrand
//!
//! | Variant              | Raised when                                              |
//! |----------------------|----------------------------------------------------------|
//! | `InvalidDevice`      | a device index is outside `0..count_devices()`           |
//! | `Initialization`     | the seed entropy source is unavailable                   |
//! | `UninitializedState` | a fill runs before seeding under the strict policy       |
//! | `UnsupportedDType`   | a container's element type is not valid for the operation |
//!
//! All errors are raised before any element of the target container is written.

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using devrand's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in devrand operations
#[derive(Error, Debug)]
pub enum Error {
    /// Device index out of range
    #[error("Invalid device index {index}: {count} device(s) available")]
    InvalidDevice {
        /// The requested device index
        index: usize,
        /// Number of devices the runtime reports
        count: usize,
    },

    /// Seed entropy source unavailable
    #[error("Seed initialization failed: {reason}")]
    Initialization {
        /// Why the entropy source failed
        reason: String,
    },

    /// Random operation invoked before the seed manager was initialized
    #[error("Random operation '{op}' invoked before seeds were initialized")]
    UninitializedState {
        /// The operation name
        op: &'static str,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Host element type does not match the container's dtype
    #[error("DType mismatch: container holds {container}, host data is {host}")]
    DTypeMismatch {
        /// The container's dtype
        container: DType,
        /// The dtype of the host-side element type
        host: DType,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Container lives on a different device than the client
    #[error("Device mismatch: container is on device {container}, client on device {client}")]
    DeviceMismatch {
        /// Device id of the container
        container: usize,
        /// Device id of the client
        client: usize,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend limitation - operation valid but exceeds backend capabilities
    #[error("{backend} limitation: {operation} - {reason}")]
    BackendLimitation {
        /// The backend that has the limitation
        backend: &'static str,
        /// The operation being attempted
        operation: &'static str,
        /// Description of the limitation
        reason: String,
    },

    /// CUDA-specific error
    #[cfg(feature = "cuda")]
    #[error("CUDA error: {0}")]
    Cuda(#[from] cudarc::driver::DriverError),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an invalid device error
    pub fn invalid_device(index: usize, count: usize) -> Self {
        Self::InvalidDevice { index, count }
    }

    /// Create an initialization error
    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::Initialization {
            reason: reason.into(),
        }
    }

    /// Create a backend limitation error
    pub fn backend_limitation(
        backend: &'static str,
        operation: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::BackendLimitation {
            backend,
            operation,
            reason: reason.into(),
        }
    }

    /// True for the caller-side configuration errors (bad device index)
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidDevice { .. })
    }
}
