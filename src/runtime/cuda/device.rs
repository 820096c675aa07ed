//! CUDA Device implementation

use crate::error::Result;
use crate::runtime::Device;

/// CUDA Device using cudarc
///
/// Identifies one GPU by its driver ordinal. Contexts and streams live in
/// the `CudaClient` cached for the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CudaDevice {
    /// Index of the GPU device (0, 1, 2, ...)
    pub(crate) index: usize,
}

impl CudaDevice {
    /// Create a new CUDA device handle (not validated)
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Device for CudaDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        format!("cuda:{}", self.index)
    }
}

impl Default for CudaDevice {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Number of CUDA devices visible to the driver
pub(crate) fn device_count() -> Result<usize> {
    cudarc::driver::result::init()?;
    let count = cudarc::driver::result::device::get_count()?;
    Ok(count.max(0) as usize)
}
