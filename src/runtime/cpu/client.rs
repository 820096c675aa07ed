//! CPU client and thread-pool configuration

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::runtime::RuntimeClient;
#[cfg(feature = "rayon")]
use std::sync::Arc;

/// Elements per parallel work item when no chunk size is configured
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Thread count and work granularity for CPU kernels
///
/// `None` keeps the default: rayon's global pool and `DEFAULT_CHUNK_SIZE`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParallelismConfig {
    num_threads: Option<usize>,
    chunk_size: Option<usize>,
}

impl ParallelismConfig {
    /// Create a configuration; zero values are treated as `None`
    pub fn new(num_threads: Option<usize>, chunk_size: Option<usize>) -> Self {
        Self {
            num_threads: num_threads.filter(|&n| n > 0),
            chunk_size: chunk_size.filter(|&n| n > 0),
        }
    }

    /// Requested worker thread count
    pub fn num_threads(&self) -> Option<usize> {
        self.num_threads
    }

    /// Requested elements per work item
    pub fn chunk_size(&self) -> Option<usize> {
        self.chunk_size
    }
}

/// CPU client for operation dispatch
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        Self {
            device,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Same client with a different parallelism configuration
    ///
    /// A thread count builds a dedicated pool. If the pool cannot be built
    /// the client logs a warning and keeps using the global pool.
    pub fn with_parallelism(mut self, config: ParallelismConfig) -> Self {
        #[cfg(feature = "rayon")]
        {
            self.pool = config.num_threads().and_then(|threads| {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => Some(Arc::new(pool)),
                    Err(e) => {
                        tracing::warn!(threads, error = %e, "failed to build thread pool, using global pool");
                        None
                    }
                }
            });
        }
        self.parallelism = config;
        self
    }

    /// Current parallelism configuration
    pub fn parallelism(&self) -> ParallelismConfig {
        self.parallelism
    }

    /// Elements per parallel work item
    #[inline]
    pub(crate) fn chunk_size(&self) -> usize {
        self.parallelism.chunk_size().unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Run `op` inside this client's thread pool
    #[cfg(feature = "rayon")]
    pub(crate) fn install_parallelism<OP, T>(&self, op: OP) -> T
    where
        OP: FnOnce() -> T + Send,
        T: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_mean_default() {
        let config = ParallelismConfig::new(Some(0), Some(0));
        assert_eq!(config, ParallelismConfig::default());
    }

    #[test]
    fn test_chunk_size() {
        let client = CpuClient::new(CpuDevice::new());
        assert_eq!(client.chunk_size(), DEFAULT_CHUNK_SIZE);
        let client = client.with_parallelism(ParallelismConfig::new(Some(2), Some(64)));
        assert_eq!(client.chunk_size(), 64);
        assert_eq!(client.parallelism().num_threads(), Some(2));
    }
}
