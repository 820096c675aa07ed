//! CUDA implementation of random fill operations.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::RandomFillOps;
use crate::ops::random_common::{validate_binarize_into, validate_fill};
use crate::random::{Distribution, SeedManager};
use crate::runtime::cuda::kernels::{FillKernel, launch_philox_binarize_into, launch_philox_fill};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::Fillable;

/// The random kernels exist for f32 and f64 only
fn ensure_kernel_dtype(dtype: DType, op: &'static str) -> Result<()> {
    if dtype.is_half() {
        return Err(Error::backend_limitation(
            "cuda",
            op,
            format!("no random kernel for {}", dtype),
        ));
    }
    Ok(())
}

impl CudaClient {
    fn fill_distribution<C: Fillable<CudaRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
        dist: Distribution,
    ) -> Result<()> {
        let op = dist.op_name();
        validate_fill::<CudaRuntime, C>(&self.device, container, op)?;
        ensure_kernel_dtype(container.dtype(), op)?;
        let launch = seeds.launch(op)?;

        let raw = container.as_raw();
        if raw.len == 0 {
            return Ok(());
        }

        let kernel = match dist {
            Distribution::Uniform => FillKernel::Uniform,
            Distribution::Normal => FillKernel::Normal,
            Distribution::Bernoulli => FillKernel::Binarize,
        };

        unsafe {
            launch_philox_fill(
                &self.context,
                &self.stream,
                self.device.index,
                kernel,
                raw.dtype,
                raw.ptr,
                raw.len,
                &launch,
            )?;
        }

        self.try_synchronize()
    }
}

/// RandomFillOps implementation for CUDA runtime.
impl RandomFillOps<CudaRuntime> for CudaClient {
    fn fill_uniform<C: Fillable<CudaRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
    ) -> Result<()> {
        self.fill_distribution(seeds, container, Distribution::Uniform)
    }

    fn fill_normal<C: Fillable<CudaRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
    ) -> Result<()> {
        self.fill_distribution(seeds, container, Distribution::Normal)
    }

    fn binarize<C: Fillable<CudaRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
    ) -> Result<()> {
        self.fill_distribution(seeds, container, Distribution::Bernoulli)
    }

    fn binarize_into<P: Fillable<CudaRuntime>, O: Fillable<CudaRuntime>>(
        &self,
        seeds: &SeedManager,
        probs: &P,
        out: &mut O,
    ) -> Result<()> {
        let op = "binarize_into";
        validate_binarize_into::<CudaRuntime, P, O>(&self.device, probs, out, op)?;
        ensure_kernel_dtype(probs.dtype(), op)?;
        ensure_kernel_dtype(out.dtype(), op)?;
        let launch = seeds.launch(op)?;

        let src = probs.as_raw();
        let dst = out.as_raw();
        if src.len == 0 {
            return Ok(());
        }

        unsafe {
            launch_philox_binarize_into(
                &self.context,
                &self.stream,
                self.device.index,
                src.dtype,
                dst.dtype,
                src.ptr,
                dst.ptr,
                src.len,
                &launch,
            )?;
        }

        self.try_synchronize()
    }
}
