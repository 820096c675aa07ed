//! Launchers for the Philox random kernels in `random.cu`

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{
    elementwise_launch_config, get_kernel_function, get_or_load_module, kernel_name, kernel_names,
};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::random::Launch;

/// Kernel families taking `(T* out, keys, streams, epoch, n)`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillKernel {
    /// Uniform[0, 1)
    Uniform,
    /// Standard normal
    Normal,
    /// In-place Bernoulli over probabilities
    Binarize,
}

impl FillKernel {
    fn base_name(self) -> &'static str {
        match self {
            Self::Uniform => "philox_uniform",
            Self::Normal => "philox_normal",
            Self::Binarize => "philox_binarize",
        }
    }
}

/// Temporary device buffer freed on the stream when dropped
struct StreamScratch<'a> {
    ptr: u64,
    stream: &'a CudaStream,
}

impl<'a> StreamScratch<'a> {
    /// Upload the per-stream key table
    fn upload_keys(stream: &'a CudaStream, keys: &[u64]) -> Result<Self> {
        let bytes = std::mem::size_of_val(keys);
        let cu_stream = stream.cu_stream();

        let mut ptr: u64 = 0;
        let result = unsafe { cudarc::driver::sys::cuMemAllocAsync(&mut ptr, bytes, cu_stream) };
        if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
            return Err(Error::OutOfMemory { size: bytes });
        }
        let scratch = Self { ptr, stream };

        let result = unsafe {
            cudarc::driver::sys::cuMemcpyHtoDAsync_v2(
                ptr,
                keys.as_ptr() as *const std::ffi::c_void,
                bytes,
                cu_stream,
            )
        };
        if result != cudarc::driver::sys::CUresult::CUDA_SUCCESS {
            return Err(Error::Backend(format!(
                "Failed to upload random stream keys ({:?})",
                result
            )));
        }

        Ok(scratch)
    }
}

impl Drop for StreamScratch<'_> {
    fn drop(&mut self) {
        // Stream-ordered: runs after the kernel that reads the keys.
        unsafe {
            let _ = cudarc::driver::sys::cuMemFreeAsync(self.ptr, self.stream.cu_stream());
        }
    }
}

/// Stream count as the kernels' 32-bit modulus
fn stream_count(launch: &Launch) -> Result<u32> {
    u32::try_from(launch.streams()).map_err(|_| {
        Error::backend_limitation(
            "cuda",
            "random",
            format!("{} streams exceed the 32-bit stream index", launch.streams()),
        )
    })
}

/// Launch a uniform, normal or in-place binarize kernel.
///
/// # Safety
/// - `out_ptr` must be a valid device pointer with at least `numel` elements of `dtype`
#[allow(clippy::too_many_arguments)]
pub unsafe fn launch_philox_fill(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    kernel: FillKernel,
    dtype: DType,
    out_ptr: u64,
    numel: usize,
    launch: &Launch,
) -> Result<()> {
    let module = get_or_load_module(context, device_index, kernel_names::RANDOM_MODULE)?;
    let func_name = kernel_name(kernel.base_name(), dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let keys = StreamScratch::upload_keys(stream, launch.keys())?;
    let streams = stream_count(launch)?;
    let epoch = launch.epoch();
    let n = numel as u64;
    let cfg = elementwise_launch_config(numel);

    unsafe {
        let mut builder = stream.launch_builder(&func);
        builder.arg(&out_ptr);
        builder.arg(&keys.ptr);
        builder.arg(&streams);
        builder.arg(&epoch);
        builder.arg(&n);

        builder.launch(cfg).map_err(|e| {
            Error::Internal(format!(
                "CUDA random kernel '{}' launch failed: {:?}",
                func_name, e
            ))
        })?;
    }

    Ok(())
}

/// Launch a binarize kernel reading `probs` and writing `out`.
///
/// # Safety
/// - `probs_ptr` and `out_ptr` must be valid device pointers with at least
///   `numel` elements of their dtypes
#[allow(clippy::too_many_arguments)]
pub unsafe fn launch_philox_binarize_into(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    probs_dtype: DType,
    out_dtype: DType,
    probs_ptr: u64,
    out_ptr: u64,
    numel: usize,
    launch: &Launch,
) -> Result<()> {
    let module = get_or_load_module(context, device_index, kernel_names::RANDOM_MODULE)?;
    let func_name = kernel_name(
        &kernel_name("philox_binarize_into", probs_dtype),
        out_dtype,
    );
    let func = get_kernel_function(&module, &func_name)?;

    let keys = StreamScratch::upload_keys(stream, launch.keys())?;
    let streams = stream_count(launch)?;
    let epoch = launch.epoch();
    let n = numel as u64;
    let cfg = elementwise_launch_config(numel);

    unsafe {
        let mut builder = stream.launch_builder(&func);
        builder.arg(&probs_ptr);
        builder.arg(&out_ptr);
        builder.arg(&keys.ptr);
        builder.arg(&streams);
        builder.arg(&epoch);
        builder.arg(&n);

        builder.launch(cfg).map_err(|e| {
            Error::Internal(format!(
                "CUDA random kernel '{}' launch failed: {:?}",
                func_name, e
            ))
        })?;
    }

    Ok(())
}
