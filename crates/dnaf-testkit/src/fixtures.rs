//! Fixtures for fountain codec tests.
//!
//! Provides the reference sample messages and pre-built session
//! configurations.

use dnaf_codec::FountainConfig;

// ─────────────────────────────────────────────────────────────────────────────
// Sample messages
// ─────────────────────────────────────────────────────────────────────────────

/// The 32-bit reference messages used by the self-test suite.
const SAMPLE_MESSAGES: [[u8; 4]; 12] = [
    [0x41, 0xAF, 0x05, 0xA5],
    [0x53, 0xC4, 0xE6, 0x49],
    [0x78, 0x4A, 0x6C, 0x4E],
    [0x8D, 0xDE, 0x70, 0x3C],
    [0xFE, 0xC9, 0x15, 0x9E],
    [0x88, 0x85, 0xBE, 0xEB],
    [0x5A, 0x50, 0xE1, 0xB6],
    [0xE8, 0xEC, 0x13, 0x4C],
    [0x6E, 0x10, 0xE0, 0x75],
    [0x26, 0x79, 0x6B, 0x22],
    [0x8A, 0xF5, 0x02, 0x4B],
    [0x57, 0x59, 0xB3, 0x52],
];

/// Reference sample messages for self-test runs.
#[must_use]
pub fn sample_messages() -> Vec<Vec<u8>> {
    SAMPLE_MESSAGES.iter().map(|m| m.to_vec()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Configurations
// ─────────────────────────────────────────────────────────────────────────────

/// Session configuration with 4-bit chunks: every 32-bit sample splits into
/// 8 chunks of 2 nucleotides each.
#[must_use]
pub fn sample_config() -> FountainConfig {
    FountainConfig {
        chunk_size_bits: 4,
        ..FountainConfig::default()
    }
}

/// Byte-aligned session configuration (8-bit chunks).
#[must_use]
pub fn byte_config() -> FountainConfig {
    FountainConfig::default()
}

/// Strict-integrity variant of [`sample_config`].
#[must_use]
pub fn strict_config() -> FountainConfig {
    FountainConfig {
        strict_integrity: true,
        ..sample_config()
    }
}
