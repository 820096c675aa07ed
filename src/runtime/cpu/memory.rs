//! Host memory status

use crate::error::{Error, Result};
use crate::runtime::MemoryInfo;

/// Free (available) and total host memory
#[cfg(target_os = "linux")]
pub(crate) fn host_memory_info() -> Result<MemoryInfo> {
    let text = std::fs::read_to_string("/proc/meminfo")
        .map_err(|e| Error::Backend(format!("failed to read /proc/meminfo: {}", e)))?;
    parse_meminfo(&text)
}

/// Free (available) and total host memory
#[cfg(not(target_os = "linux"))]
pub(crate) fn host_memory_info() -> Result<MemoryInfo> {
    Err(Error::backend_limitation(
        "cpu",
        "memory_info",
        "host memory status is only available on Linux",
    ))
}

/// Parse `/proc/meminfo`, whose sizes are in kB
///
/// Uses `MemAvailable` for free memory, falling back to `MemFree` on
/// kernels older than 3.14.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn parse_meminfo(text: &str) -> Result<MemoryInfo> {
    let field = |name: &str| -> Option<u64> {
        text.lines().find_map(|line| {
            let rest = line.strip_prefix(name)?.strip_prefix(':')?;
            let kb = rest.split_whitespace().next()?.parse::<u64>().ok()?;
            Some(kb * 1024)
        })
    };

    let total = field("MemTotal")
        .ok_or_else(|| Error::Backend("MemTotal missing from /proc/meminfo".to_string()))?;
    let free = field("MemAvailable")
        .or_else(|| field("MemFree"))
        .ok_or_else(|| Error::Backend("MemAvailable missing from /proc/meminfo".to_string()))?;

    Ok(MemoryInfo::new(free, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "MemTotal:       16318412 kB\n\
                          MemFree:         1210732 kB\n\
                          MemAvailable:    9034560 kB\n\
                          Buffers:          512044 kB\n";

    #[test]
    fn test_parse_meminfo() {
        let info = parse_meminfo(SAMPLE).unwrap();
        assert_eq!(info.total, 16318412 * 1024);
        assert_eq!(info.free, 9034560 * 1024);
    }

    #[test]
    fn test_parse_meminfo_without_available() {
        let info = parse_meminfo("MemTotal: 1000 kB\nMemFree: 400 kB\n").unwrap();
        assert_eq!(info.free, 400 * 1024);
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        assert!(parse_meminfo("MemFree: 400 kB\n").is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_host_memory_info() {
        let info = host_memory_info().unwrap();
        assert!(info.total > 0);
        assert!(info.free <= info.total);
    }
}
