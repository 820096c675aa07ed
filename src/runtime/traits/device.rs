//! Trait for device identification

/// Trait for device identification
pub trait Device: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}

/// Memory status of one device, in bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemoryInfo {
    /// Bytes currently available for allocation
    pub free: u64,
    /// Total bytes of device memory
    pub total: u64,
}

impl MemoryInfo {
    /// Build from a (free, total) pair, clamping `free` to `total`
    ///
    /// Drivers report both numbers from separate counters; a racing
    /// allocation can make `free` overshoot by a page.
    pub fn new(free: u64, total: u64) -> Self {
        Self {
            free: free.min(total),
            total,
        }
    }

    /// Bytes in use
    pub fn used(&self) -> u64 {
        self.total - self.free
    }
}
