//! Common test utilities
#![allow(dead_code)]

use devrand::random::{SeedConfig, SeedManager};
use devrand::runtime::Runtime;
use devrand::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "cuda")]
use devrand::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create a CUDA client and device, returning None if CUDA is unavailable
#[cfg(feature = "cuda")]
pub fn create_cuda_client() -> Option<(CudaClient, CudaDevice)> {
    if !devrand::runtime::cuda::is_cuda_available() {
        return None;
    }
    let device = CudaDevice::new(0);
    let client = CudaRuntime::client(&device).ok()?;
    Some((client, device))
}

/// Seed manager with a fixed seed, already initialized
pub fn seeded_manager(seed: u64) -> SeedManager {
    let seeds = SeedManager::with_config(SeedConfig::new().with_seed(seed));
    seeds.initialize().expect("fixed-seed initialization cannot fail");
    seeds
}

/// Route `tracing` output to the test harness (`RUST_LOG` selects levels)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Sample mean and (unbiased) standard deviation
pub fn mean_std(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

/// Pearson chi-square statistic of `data` against Uniform[0, 1) over `bins` bins
pub fn chi_square_uniform(data: &[f64], bins: usize) -> f64 {
    let mut counts = vec![0usize; bins];
    for &x in data {
        let bin = ((x * bins as f64) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    let expected = data.len() as f64 / bins as f64;
    counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum()
}

/// Chi-square critical value for 99 degrees of freedom at significance 0.01
pub const CHI_SQUARE_99_DF_P01: f64 = 134.642;
