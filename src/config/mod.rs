//! Configuration for splitting behavior.
//!
//! This module provides the type that configures how hashsplitting is
//! performed:
//!
//! - [`SplitConfig`] - Controls boundary selection and chunk size limits
//!
//! # Example
//!
//! ```
//! use splitrs::SplitConfig;
//!
//! // 12 split bits (~4 KiB mean), 64-byte minimum, 64 KiB cap
//! let config = SplitConfig::new(12, 64, 64 * 1024)?;
//!
//! // Fully independent chunks
//! let config = SplitConfig::default().with_reset_between_chunks(true);
//! # Ok::<(), splitrs::SplitError>(())
//! ```

use crate::error::SplitError;

/// Default number of trailing zero bits that constitute a boundary.
///
/// 13 bits puts a boundary roughly every 8,192 bytes on average. The median
/// chunk is smaller (about 5,678 bytes) because chunk lengths are
/// geometrically distributed.
pub const DEFAULT_SPLIT_BITS: u32 = 13;

/// Default minimum chunk size in bytes.
///
/// Equals the default rolling-checksum window so that a boundary decision
/// never depends on bytes of the preceding chunk.
pub const DEFAULT_MIN_SIZE: usize = 64;

/// Default maximum chunk size; 0 means unbounded.
pub const DEFAULT_MAX_SIZE: usize = 0;

/// Configuration for content-defined splitting behavior.
///
/// A boundary occurs where the rolling checksum has at least `split_bits`
/// trailing zero bits, subject to the size limits:
///
/// - `min_size` - boundary checks are suppressed until the current chunk has
///   at least this many bytes; only the final chunk may be smaller
/// - `max_size` - if non-zero, a boundary is forced (at level 0) once a chunk
///   reaches this many bytes
///
/// # Window interaction
///
/// With `min_size` smaller than the checksum window and
/// `reset_between_chunks` left off, the window still spans the previous
/// chunk when the first boundary checks run, so a boundary is not fully
/// determined by the current chunk's bytes. Set `min_size` to at least the
/// window width (the default) or enable `reset_between_chunks` to make
/// boundaries locally determined.
///
/// # Example
///
/// ```
/// use splitrs::SplitConfig;
///
/// // Use default configuration
/// let config = SplitConfig::default();
///
/// // Custom configuration
/// let config = SplitConfig::new(13, 64, 1 << 20)?;
///
/// // Builder pattern
/// let config = SplitConfig::default()
///     .with_split_bits(11)
///     .with_max_size(32 * 1024);
/// # Ok::<(), splitrs::SplitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitConfig {
    /// Trailing zero bits of the digest required for a boundary.
    split_bits: u32,

    /// Minimum bytes per non-final chunk.
    min_size: usize,

    /// Maximum bytes per chunk; 0 disables the cap.
    max_size: usize,

    /// Reinitialize the rolling checksum at every boundary.
    reset_between_chunks: bool,
}

impl SplitConfig {
    /// Creates a new configuration with the given boundary parameters.
    ///
    /// # Arguments
    ///
    /// * `split_bits` - Trailing zero bits required for a boundary (1..=31)
    /// * `min_size` - Minimum bytes per non-final chunk (at least 1)
    /// * `max_size` - Maximum bytes per chunk, or 0 for unbounded
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] if:
    /// - `split_bits` is 0 or larger than 31
    /// - `min_size` is 0 (use 1 to mean "no minimum")
    /// - `max_size` is non-zero but smaller than `min_size`
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::SplitConfig;
    ///
    /// let config = SplitConfig::new(13, 64, 0)?;
    /// assert_eq!(config.split_bits(), 13);
    /// # Ok::<(), splitrs::SplitError>(())
    /// ```
    pub fn new(split_bits: u32, min_size: usize, max_size: usize) -> Result<Self, SplitError> {
        let config = Self {
            split_bits,
            min_size,
            max_size,
            reset_between_chunks: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the number of trailing zero bits required for a boundary.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`SplitConfig::validate`] to check if the configuration is valid.
    pub fn with_split_bits(mut self, bits: u32) -> Self {
        self.split_bits = bits;
        self
    }

    /// Sets the minimum chunk size.
    ///
    /// Set to 1 to disable the minimum entirely. Note: This does not
    /// validate the configuration; use [`SplitConfig::validate`].
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the maximum chunk size; 0 means unbounded.
    ///
    /// Note: This does not validate the configuration; use
    /// [`SplitConfig::validate`].
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets whether the rolling checksum is reinitialized at each boundary.
    ///
    /// Off by default, which preserves cross-chunk context in the checksum
    /// window. Turn on (together with `min_size` at least the window width)
    /// to make every chunk boundary a function of that chunk's bytes only.
    pub fn with_reset_between_chunks(mut self, reset: bool) -> Self {
        self.reset_between_chunks = reset;
        self
    }

    /// Returns the number of trailing zero bits required for a boundary.
    pub fn split_bits(&self) -> u32 {
        self.split_bits
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the maximum chunk size (0 means unbounded).
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns whether the checksum is reinitialized at each boundary.
    pub fn reset_between_chunks(&self) -> bool {
        self.reset_between_chunks
    }

    /// Validates the current configuration.
    ///
    /// Returns an error if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::SplitConfig;
    ///
    /// let config = SplitConfig::default().with_min_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.split_bits == 0 || self.split_bits > 31 {
            return Err(SplitError::InvalidConfig {
                message: "split_bits must be between 1 and 31",
            });
        }

        if self.min_size == 0 {
            return Err(SplitError::InvalidConfig {
                message: "min_size must be at least 1 (1 means no minimum)",
            });
        }

        if self.max_size != 0 && self.max_size < self.min_size {
            return Err(SplitError::InvalidConfig {
                message: "max_size must be 0 (unbounded) or at least min_size",
            });
        }

        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            split_bits: DEFAULT_SPLIT_BITS,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            reset_between_chunks: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SplitConfig::default();
        assert_eq!(config.split_bits(), DEFAULT_SPLIT_BITS);
        assert_eq!(config.min_size(), DEFAULT_MIN_SIZE);
        assert_eq!(config.max_size(), DEFAULT_MAX_SIZE);
        assert!(!config.reset_between_chunks());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SplitConfig::default()
            .with_split_bits(11)
            .with_min_size(128)
            .with_max_size(1 << 16)
            .with_reset_between_chunks(true);

        assert_eq!(config.split_bits(), 11);
        assert_eq!(config.min_size(), 128);
        assert_eq!(config.max_size(), 1 << 16);
        assert!(config.reset_between_chunks());
    }

    #[test]
    fn test_invalid_split_bits() {
        assert!(SplitConfig::new(0, 64, 0).is_err());
        assert!(SplitConfig::new(32, 64, 0).is_err());
        assert!(SplitConfig::new(31, 64, 0).is_ok());
    }

    #[test]
    fn test_invalid_zero_min_size() {
        assert!(SplitConfig::new(13, 0, 0).is_err());
        assert!(SplitConfig::new(13, 1, 0).is_ok());
    }

    #[test]
    fn test_invalid_max_below_min() {
        assert!(SplitConfig::new(13, 64, 32).is_err());
        assert!(SplitConfig::new(13, 64, 64).is_ok());
        assert!(SplitConfig::new(13, 64, 0).is_ok());
    }
}
