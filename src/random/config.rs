//! Seed manager configuration

use crate::error::{Error, Result};

/// Number of parallel sub-streams derived at initialization
pub const DEFAULT_STREAMS: usize = 4096;

/// Largest sub-stream count; kernels index streams with 32-bit integers
pub const MAX_STREAMS: usize = u32::MAX as usize;

/// Environment variable holding a fixed base seed (decimal or `0x` hex)
pub const ENV_SEED: &str = "DEVRAND_SEED";

/// Environment variable overriding the number of sub-streams
pub const ENV_STREAMS: &str = "DEVRAND_STREAMS";

/// Environment variable selecting lazy initialization (`1`, `true`, `yes`)
pub const ENV_LAZY_INIT: &str = "DEVRAND_LAZY_INIT";

/// What a random operation does when the seed manager was never initialized
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum UninitializedPolicy {
    /// Fail with `Error::UninitializedState`
    #[default]
    Strict,
    /// Initialize from the configured entropy source and log a warning
    Lazy,
}

/// Configuration of a [`SeedManager`](super::SeedManager)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    streams: usize,
    policy: UninitializedPolicy,
    seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            streams: DEFAULT_STREAMS,
            policy: UninitializedPolicy::Strict,
            seed: None,
        }
    }
}

impl SeedConfig {
    /// Default configuration: 4096 streams, strict policy, OS entropy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of parallel sub-streams, clamped to `1..=MAX_STREAMS`
    pub fn with_streams(mut self, streams: usize) -> Self {
        self.streams = streams.clamp(1, MAX_STREAMS);
        self
    }

    /// Set the uninitialized-state policy
    pub fn with_policy(mut self, policy: UninitializedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a fixed base seed instead of OS entropy
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parallel sub-streams
    pub fn streams(&self) -> usize {
        self.streams
    }

    /// Uninitialized-state policy
    pub fn policy(&self) -> UninitializedPolicy {
        self.policy
    }

    /// Fixed base seed, if configured
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Read the configuration from `DEVRAND_*` environment variables
    ///
    /// A malformed variable is logged and leaves its field at the default;
    /// the other variables still apply.
    pub fn from_env() -> Self {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Read the configuration from `DEVRAND_*` environment variables
    ///
    /// Fails on the first malformed variable.
    pub fn try_from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::read_vars(lookup, Err)
    }

    pub(crate) fn from_lookup_lenient(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let skip_malformed = |e: Error| {
            tracing::warn!(error = %e, "ignoring malformed seed configuration variable");
            Ok(())
        };
        // `skip_malformed` never fails, so neither does `read_vars`.
        Self::read_vars(lookup, skip_malformed).unwrap_or_default()
    }

    /// Apply each variable that is set; `on_error` decides whether a
    /// malformed one aborts the read or is skipped
    fn read_vars(
        lookup: impl Fn(&str) -> Option<String>,
        mut on_error: impl FnMut(Error) -> Result<()>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEED) {
            match parse_seed(raw.trim()) {
                Ok(seed) => config.seed = Some(seed),
                Err(e) => on_error(e)?,
            }
        }

        if let Some(raw) = lookup(ENV_STREAMS) {
            match parse_streams(&raw) {
                Ok(streams) => config.streams = streams,
                Err(e) => on_error(e)?,
            }
        }

        if let Some(raw) = lookup(ENV_LAZY_INIT) {
            match parse_policy(&raw) {
                Ok(policy) => config.policy = policy,
                Err(e) => on_error(e)?,
            }
        }

        Ok(config)
    }
}

fn parse_streams(raw: &str) -> Result<usize> {
    let streams: usize = raw.trim().parse().map_err(|_| Error::InvalidArgument {
        arg: ENV_STREAMS,
        reason: format!("expected a positive integer, got '{}'", raw),
    })?;
    if streams == 0 || streams > MAX_STREAMS {
        return Err(Error::InvalidArgument {
            arg: ENV_STREAMS,
            reason: format!("stream count must be in 1..={}, got {}", MAX_STREAMS, streams),
        });
    }
    Ok(streams)
}

fn parse_policy(raw: &str) -> Result<UninitializedPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(UninitializedPolicy::Lazy),
        "0" | "false" | "no" | "off" | "" => Ok(UninitializedPolicy::Strict),
        other => Err(Error::InvalidArgument {
            arg: ENV_LAZY_INIT,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

fn parse_seed(raw: &str) -> Result<u64> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|_| Error::InvalidArgument {
        arg: ENV_SEED,
        reason: format!("expected a u64 seed, got '{}'", raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SeedConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SeedConfig::default());
        assert_eq!(config.streams(), DEFAULT_STREAMS);
        assert_eq!(config.policy(), UninitializedPolicy::Strict);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_env_overrides() {
        let config = SeedConfig::from_lookup(lookup(&[
            (ENV_SEED, "0xDEADBEEF"),
            (ENV_STREAMS, " 64 "),
            (ENV_LAZY_INIT, "True"),
        ]))
        .unwrap();
        assert_eq!(config.seed(), Some(0xDEADBEEF));
        assert_eq!(config.streams(), 64);
        assert_eq!(config.policy(), UninitializedPolicy::Lazy);
    }

    #[test]
    fn test_decimal_seed() {
        let config = SeedConfig::from_lookup(lookup(&[(ENV_SEED, "12345")])).unwrap();
        assert_eq!(config.seed(), Some(12345));
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(SeedConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])).is_err());
        assert!(SeedConfig::from_lookup(lookup(&[(ENV_STREAMS, "0")])).is_err());
        assert!(SeedConfig::from_lookup(lookup(&[(ENV_STREAMS, "-4")])).is_err());
        assert!(SeedConfig::from_lookup(lookup(&[(ENV_LAZY_INIT, "maybe")])).is_err());
    }

    #[test]
    fn test_builder_clamps_streams() {
        let config = SeedConfig::new().with_streams(0);
        assert_eq!(config.streams(), 1);

        let config = SeedConfig::new().with_streams(usize::MAX);
        assert_eq!(config.streams(), MAX_STREAMS);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_stream_count_beyond_u32_rejected() {
        let too_many = (MAX_STREAMS + 1).to_string();
        let err = SeedConfig::from_lookup(lookup(&[(ENV_STREAMS, too_many.as_str())])).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: ENV_STREAMS, .. }));

        let max = MAX_STREAMS.to_string();
        let config = SeedConfig::from_lookup(lookup(&[(ENV_STREAMS, max.as_str())])).unwrap();
        assert_eq!(config.streams(), MAX_STREAMS);
    }

    #[test]
    fn test_lenient_read_keeps_valid_fields() {
        let config = SeedConfig::from_lookup_lenient(lookup(&[
            (ENV_SEED, "42"),
            (ENV_STREAMS, "0"),
            (ENV_LAZY_INIT, "maybe"),
        ]));
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.streams(), DEFAULT_STREAMS);
        assert_eq!(config.policy(), UninitializedPolicy::Strict);

        let config = SeedConfig::from_lookup_lenient(lookup(&[
            (ENV_SEED, "not-a-seed"),
            (ENV_LAZY_INIT, "yes"),
        ]));
        assert_eq!(config.seed(), None);
        assert_eq!(config.policy(), UninitializedPolicy::Lazy);
    }
}
