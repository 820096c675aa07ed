//! Counter-based random kernels for CPU
//!
//! Every element is a pure function of the launch and its flat index, so the
//! output is identical for any thread count or chunk size. Work is split
//! into `client.chunk_size()` pieces and run on the client's rayon pool.

use super::super::client::CpuClient;
use crate::dtype::Element;
use crate::random::Launch;
use crate::random::distribution::{bernoulli, significand_bits, standard_normal, uniform};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small buffers (overhead > benefit)
const PARALLEL_THRESHOLD: usize = 4096;

/// Apply `f(index, &mut element)` to every element of `out`
#[inline]
fn for_each_indexed<T, F>(client: &CpuClient, out: &mut [T], f: F)
where
    T: Element,
    F: Fn(usize, &mut T) + Sync,
{
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        let chunk = client.chunk_size();
        client.install_parallelism(|| {
            out.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(c, part)| {
                    let base = c * chunk;
                    for (k, x) in part.iter_mut().enumerate() {
                        f(base + k, x);
                    }
                });
        });
        return;
    }

    #[cfg(not(feature = "rayon"))]
    let _ = client;

    for (i, x) in out.iter_mut().enumerate() {
        f(i, x);
    }
}

/// Fill with Uniform[0, 1) samples at the element type's full precision
///
/// # Safety
/// - `out` must be a valid pointer to `len` elements
#[inline]
pub unsafe fn uniform_kernel<T: Element>(
    client: &CpuClient,
    out: *mut T,
    len: usize,
    launch: &Launch,
) {
    let out_slice = unsafe { std::slice::from_raw_parts_mut(out, len) };
    let bits = significand_bits(T::DTYPE);

    for_each_indexed(client, out_slice, |i, x| {
        *x = T::from_f64(uniform(launch.block(i), bits));
    });
}

/// Fill with standard normal samples (Box-Muller)
///
/// # Safety
/// - `out` must be a valid pointer to `len` elements
#[inline]
pub unsafe fn normal_kernel<T: Element>(
    client: &CpuClient,
    out: *mut T,
    len: usize,
    launch: &Launch,
) {
    let out_slice = unsafe { std::slice::from_raw_parts_mut(out, len) };

    for_each_indexed(client, out_slice, |i, x| {
        *x = T::from_f64(standard_normal(launch.block(i)));
    });
}

/// Replace each probability with a Bernoulli draw (0 or 1) in place
///
/// # Safety
/// - `data` must be a valid pointer to `len` elements
#[inline]
pub unsafe fn bernoulli_inplace_kernel<T: Element>(
    client: &CpuClient,
    data: *mut T,
    len: usize,
    launch: &Launch,
) {
    let slice = unsafe { std::slice::from_raw_parts_mut(data, len) };

    for_each_indexed(client, slice, |i, x| {
        let hit = bernoulli(launch.block(i), x.to_f64());
        *x = if hit { T::one() } else { T::zero() };
    });
}

/// Write a Bernoulli draw for each probability in `probs` to `out`
///
/// # Safety
/// - `probs` and `out` must be valid pointers to `len` elements
/// - the two ranges must not overlap
#[inline]
pub unsafe fn bernoulli_kernel<P: Element, O: Element>(
    client: &CpuClient,
    probs: *const P,
    out: *mut O,
    len: usize,
    launch: &Launch,
) {
    let probs = unsafe { std::slice::from_raw_parts(probs, len) };
    let out_slice = unsafe { std::slice::from_raw_parts_mut(out, len) };

    for_each_indexed(client, out_slice, |i, x| {
        let hit = bernoulli(launch.block(i), probs[i].to_f64());
        *x = if hit { O::one() } else { O::zero() };
    });
}
