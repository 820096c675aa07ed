//! Conversion of Philox output words into distribution samples
//!
//! Every transform consumes one 4-word block and is exact in the target
//! precision: uniforms are built from as many random bits as the element
//! type has significand bits, so they are representable without rounding
//! and never reach 1.0.

use crate::dtype::DType;
use std::f64::consts::PI;

/// Distributions the fill operations draw from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Uniform on [0, 1)
    Uniform,
    /// Standard normal N(0, 1)
    Normal,
    /// Bernoulli with per-element success probability
    Bernoulli,
}

impl Distribution {
    /// Operation name used in errors and log records
    pub fn op_name(self) -> &'static str {
        match self {
            Self::Uniform => "fill_uniform",
            Self::Normal => "fill_normal",
            Self::Bernoulli => "binarize",
        }
    }
}

/// Significand precision (including the implicit bit) of a float dtype
#[inline]
pub fn significand_bits(dtype: DType) -> u32 {
    match dtype {
        DType::F64 => 53,
        DType::F32 => 24,
        DType::F16 => 11,
        DType::BF16 => 8,
        _ => 53,
    }
}

#[inline(always)]
fn join(hi: u32, lo: u32) -> u64 {
    ((hi as u64) << 32) | lo as u64
}

/// Uniform on [0, 1) with `bits` bits of resolution (1..=53)
#[inline(always)]
pub fn uniform_bits(hi: u32, lo: u32, bits: u32) -> f64 {
    let scale = 1.0 / (1u64 << bits) as f64;
    (join(hi, lo) >> (64 - bits)) as f64 * scale
}

/// Uniform on [0, 1) sample for an element of precision `bits`
#[inline(always)]
pub fn uniform(block: [u32; 4], bits: u32) -> f64 {
    uniform_bits(block[0], block[1], bits)
}

/// Standard normal sample via Box-Muller (cosine branch)
///
/// `u1` lies in (0, 1] so the logarithm is always finite.
#[inline(always)]
pub fn standard_normal(block: [u32; 4]) -> f64 {
    let u1 = 1.0 - uniform_bits(block[0], block[1], 53);
    let u2 = uniform_bits(block[2], block[3], 53);
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

/// Probability clamped into [0, 1]; NaN counts as 0
#[inline(always)]
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Bernoulli draw: true with probability `p` (clamped)
#[inline(always)]
pub fn bernoulli(block: [u32; 4], p: f64) -> bool {
    uniform_bits(block[0], block[1], 53) < clamp_probability(p)
}
