//! Channel configuration.

use thiserror::Error;

/// Default capacity of a channel's bounded input queue.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64;

/// Tunables for a concurrent fold channel.
///
/// A `Config` is a plain immutable value captured at construction time;
/// there is no ambient or global configuration. Overrides are applied
/// builder-style over the defaults:
///
/// ```rust
/// use rill::concurrent::Config;
///
/// let cfg = Config::new().buffer_capacity(8).inspect(true);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) buffer_capacity: usize,
    pub(crate) inspect: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            inspect: false,
        }
    }
}

impl Config {
    /// Create a config with the defaults: buffer capacity
    /// [`DEFAULT_BUFFER_CAPACITY`], inspection off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity of the bounded input queue.
    ///
    /// Must be positive; a zero capacity is rejected when the channel is
    /// constructed, not on first use.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Record queue-depth and throughput counters for debugging.
    ///
    /// See [`ChannelFold::stats`](crate::concurrent::ChannelFold::stats).
    pub fn inspect(mut self, on: bool) -> Self {
        self.inspect = on;
        self
    }

    pub(crate) fn validated(self) -> Result<Self, ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroBufferCapacity);
        }
        Ok(self)
    }
}

/// Invalid channel configuration, reported synchronously at construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The bounded input queue cannot hold zero items.
    #[error("buffer capacity must be positive")]
    ZeroBufferCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::new();
        assert_eq!(cfg.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert!(!cfg.inspect);
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = Config::new().buffer_capacity(3).inspect(true);
        assert_eq!(cfg.buffer_capacity, 3);
        assert!(cfg.inspect);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        assert_eq!(
            Config::new().buffer_capacity(0).validated().unwrap_err(),
            ConfigError::ZeroBufferCapacity
        );
    }

    #[test]
    fn test_positive_capacity_is_valid() {
        assert!(Config::new().buffer_capacity(1).validated().is_ok());
    }
}
