//! CPU implementation of random fill operations.

use crate::error::Result;
use crate::ops::RandomFillOps;
use crate::ops::random_common::{validate_binarize_into, validate_fill};
use crate::random::{Distribution, SeedManager};
use crate::runtime::RuntimeClient;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Fillable;
use crate::{dispatch_dtype, dispatch_float_dtype};

impl CpuClient {
    fn fill_distribution<C: Fillable<CpuRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
        dist: Distribution,
    ) -> Result<()> {
        let op = dist.op_name();
        validate_fill::<CpuRuntime, C>(&self.device, container, op)?;
        let launch = seeds.launch(op)?;

        let raw = container.as_raw();
        if raw.len == 0 {
            return Ok(());
        }

        dispatch_float_dtype!(raw.dtype, T => {
            let ptr = raw.ptr as *mut T;
            unsafe {
                match dist {
                    Distribution::Uniform => kernels::uniform_kernel::<T>(self, ptr, raw.len, &launch),
                    Distribution::Normal => kernels::normal_kernel::<T>(self, ptr, raw.len, &launch),
                    Distribution::Bernoulli => {
                        kernels::bernoulli_inplace_kernel::<T>(self, ptr, raw.len, &launch)
                    }
                }
            }
            Ok(())
        }, op)?;

        self.synchronize();
        Ok(())
    }
}

/// RandomFillOps implementation for CPU runtime.
impl RandomFillOps<CpuRuntime> for CpuClient {
    fn fill_uniform<C: Fillable<CpuRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
    ) -> Result<()> {
        self.fill_distribution(seeds, container, Distribution::Uniform)
    }

    fn fill_normal<C: Fillable<CpuRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
    ) -> Result<()> {
        self.fill_distribution(seeds, container, Distribution::Normal)
    }

    fn binarize<C: Fillable<CpuRuntime>>(
        &self,
        seeds: &SeedManager,
        container: &mut C,
    ) -> Result<()> {
        self.fill_distribution(seeds, container, Distribution::Bernoulli)
    }

    fn binarize_into<P: Fillable<CpuRuntime>, O: Fillable<CpuRuntime>>(
        &self,
        seeds: &SeedManager,
        probs: &P,
        out: &mut O,
    ) -> Result<()> {
        let op = "binarize_into";
        validate_binarize_into::<CpuRuntime, P, O>(&self.device, probs, out, op)?;
        let launch = seeds.launch(op)?;

        let src = probs.as_raw();
        let dst = out.as_raw();
        if src.len == 0 {
            return Ok(());
        }

        dispatch_float_dtype!(src.dtype, PT => {
            dispatch_dtype!(dst.dtype, OT => {
                unsafe {
                    kernels::bernoulli_kernel::<PT, OT>(
                        self,
                        src.ptr as *const PT,
                        dst.ptr as *mut OT,
                        src.len,
                        &launch,
                    );
                }
                Ok(())
            }, op)
        }, op)?;

        self.synchronize();
        Ok(())
    }
}
