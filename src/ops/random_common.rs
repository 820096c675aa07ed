//! Validation shared by the random fill backends

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use crate::tensor::Fillable;

/// Reject dtypes a random fill cannot produce
pub(crate) fn validate_float_dtype(dtype: DType, op: &'static str) -> Result<()> {
    if !dtype.is_float() {
        return Err(Error::unsupported_dtype(dtype, op));
    }
    Ok(())
}

/// Reject half-precision dtypes when the `f16` feature is off
pub(crate) fn validate_enabled_dtype(dtype: DType, op: &'static str) -> Result<()> {
    if dtype.is_half() && !cfg!(feature = "f16") {
        return Err(Error::unsupported_dtype(dtype, op));
    }
    Ok(())
}

/// Reject a container that lives on another device than the client
pub(crate) fn validate_device<R: Runtime>(client: &R::Device, container: &R::Device) -> Result<()> {
    if !client.is_same(container) {
        return Err(Error::DeviceMismatch {
            container: container.id(),
            client: client.id(),
        });
    }
    Ok(())
}

/// Checks for `fill_uniform`, `fill_normal` and `binarize`
pub(crate) fn validate_fill<R: Runtime, C: Fillable<R>>(
    client: &R::Device,
    container: &C,
    op: &'static str,
) -> Result<()> {
    validate_float_dtype(container.dtype(), op)?;
    validate_enabled_dtype(container.dtype(), op)?;
    validate_device::<R>(client, container.device())
}

/// Checks for `binarize_into`
pub(crate) fn validate_binarize_into<R: Runtime, P: Fillable<R>, O: Fillable<R>>(
    client: &R::Device,
    probs: &P,
    out: &O,
    op: &'static str,
) -> Result<()> {
    validate_float_dtype(probs.dtype(), op)?;
    validate_enabled_dtype(probs.dtype(), op)?;
    validate_enabled_dtype(out.dtype(), op)?;
    validate_device::<R>(client, probs.device())?;
    validate_device::<R>(client, out.device())?;

    if probs.shape() != out.shape() || probs.memory_order() != out.memory_order() {
        return Err(Error::shape_mismatch(probs.shape(), out.shape()));
    }
    Ok(())
}
