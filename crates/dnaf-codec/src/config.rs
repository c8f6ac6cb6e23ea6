//! Fountain session configuration.

// Allow truncation casts - droplet counts are bounded by session size
#![allow(clippy::cast_possible_truncation)]

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fountain session configuration.
///
/// `chunk_size_bits` must match on both sides of a session; it is part of the
/// out-of-band metadata that travels next to the droplet stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FountainConfig {
    /// Chunk size in bits. Must be positive and even so every chunk maps to
    /// whole nucleotides.
    ///
    /// Default: 8
    pub chunk_size_bits: usize,

    /// Extra droplets in basis points of `chunk_count`.
    ///
    /// 20000 = 200% overhead = 3 x `chunk_count` droplets total.
    ///
    /// Default: 20000
    pub redundancy_bps: u32,

    /// Seed width in the framed stream, in symbols (2 bits each).
    ///
    /// Must be in `1..=32` so a seed fits `u64`.
    ///
    /// Default: 16 (32-bit seed space)
    pub seed_symbols: usize,

    /// Verify exhausted droplets against resolved chunk values.
    ///
    /// When set, a droplet whose residual set empties with a nonzero residual
    /// payload raises `IntegrityMismatch` instead of being dropped.
    ///
    /// Default: false
    pub strict_integrity: bool,
}

impl Default for FountainConfig {
    fn default() -> Self {
        Self {
            chunk_size_bits: 8,
            redundancy_bps: 20_000,
            seed_symbols: 16,
            strict_integrity: false,
        }
    }
}

impl FountainConfig {
    /// Validate the configuration. Both sides of a session run this; an
    /// invalid configuration is rejected before any droplet is produced or
    /// ingested.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidChunkSize` if the chunk size is zero or
    /// odd, and `ConfigError::InvalidSeedWidth` if the seed width cannot
    /// represent a `u64` seed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size_bits == 0 || self.chunk_size_bits % 2 != 0 {
            return Err(ConfigError::InvalidChunkSize {
                bits: self.chunk_size_bits,
            });
        }
        if self.seed_symbols == 0 || self.seed_symbols > 32 {
            return Err(ConfigError::InvalidSeedWidth {
                seed_symbols: self.seed_symbols,
            });
        }
        Ok(())
    }

    /// Number of chunks a message of `message_len` bytes splits into.
    #[must_use]
    pub const fn chunk_count(&self, message_len: usize) -> usize {
        (message_len * 8).div_ceil(self.chunk_size_bits)
    }

    /// Droplet count for a session of `chunk_count` chunks at the configured
    /// redundancy.
    #[must_use]
    pub fn droplet_count(&self, chunk_count: usize) -> usize {
        let extra = (chunk_count as u64 * u64::from(self.redundancy_bps) / 10_000) as usize;
        chunk_count + extra
    }

    /// Payload symbols per droplet.
    #[must_use]
    pub const fn payload_symbols(&self) -> usize {
        self.chunk_size_bits / 2
    }

    /// Framed-stream segment length in symbols (seed + payload).
    #[must_use]
    pub const fn segment_symbols(&self) -> usize {
        self.seed_symbols + self.payload_symbols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = FountainConfig::default();
        assert_eq!(config.chunk_size_bits, 8);
        assert_eq!(config.redundancy_bps, 20_000);
        assert_eq!(config.seed_symbols, 16);
        assert!(!config.strict_integrity);
        config.validate().unwrap();
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let config = FountainConfig {
            chunk_size_bits: 0,
            ..FountainConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkSize { bits: 0 })
        ));
    }

    #[test]
    fn odd_chunk_size_rejected() {
        let config = FountainConfig {
            chunk_size_bits: 7,
            ..FountainConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkSize { bits: 7 })
        ));
    }

    #[test]
    fn oversized_seed_width_rejected() {
        let config = FountainConfig {
            seed_symbols: 33,
            ..FountainConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeedWidth { seed_symbols: 33 })
        ));
    }

    #[test]
    fn chunk_count_calculation() {
        let config = FountainConfig::default();
        // 4 bytes / 8-bit chunks = 4 chunks
        assert_eq!(config.chunk_count(4), 4);
        // 5 bytes / 8-bit chunks = 5 chunks
        assert_eq!(config.chunk_count(5), 5);

        let config = FountainConfig {
            chunk_size_bits: 12,
            ..FountainConfig::default()
        };
        // 32 bits / 12-bit chunks = 3 chunks (ceiling)
        assert_eq!(config.chunk_count(4), 3);
    }

    #[test]
    fn droplet_count_from_basis_points() {
        let config = FountainConfig::default();
        // 200% overhead: 4 chunks -> 12 droplets
        assert_eq!(config.droplet_count(4), 12);

        let config = FountainConfig {
            redundancy_bps: 5_000,
            ..FountainConfig::default()
        };
        // 50% overhead: 4 chunks -> 6 droplets
        assert_eq!(config.droplet_count(4), 6);
        // Rounds down: 3 chunks -> 3 + 1 = 4
        assert_eq!(config.droplet_count(3), 4);
    }

    #[test]
    fn segment_symbols() {
        let config = FountainConfig::default();
        // 16 seed symbols + 8/2 payload symbols
        assert_eq!(config.payload_symbols(), 4);
        assert_eq!(config.segment_symbols(), 20);
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = FountainConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: FountainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chunk_size_bits, config.chunk_size_bits);
        assert_eq!(back.redundancy_bps, config.redundancy_bps);
        assert_eq!(back.seed_symbols, config.seed_symbols);
    }
}
