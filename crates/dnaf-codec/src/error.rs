//! Fountain codec error types.

use thiserror::Error;

/// Chunk selection errors.
///
/// Selection runs on both the encode and decode side; both wrap this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// A session over zero chunks is meaningless.
    #[error("chunk count must be at least 1")]
    ZeroChunkCount,

    /// Degree fell outside `[1, chunk_count]`.
    ///
    /// The degree table's contract makes this impossible; checked defensively.
    #[error("degree {degree} out of range for {chunk_count} chunks")]
    DegreeOutOfRange {
        /// The computed degree.
        degree: usize,
        /// Number of chunks in the session.
        chunk_count: usize,
    },
}

/// Nucleotide mapping errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// A character outside `{A, C, G, T}` was encountered.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based position in the symbol string.
        position: usize,
    },

    /// Symbol mapping requires an even number of bits (2 bits per symbol).
    #[error("bit string length {bits} is not a multiple of 2")]
    OddBitLength {
        /// Length of the offending bit string.
        bits: usize,
    },
}

/// Session configuration errors.
///
/// A session configuration is validated on both sides; encoder and decoder
/// wrap this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Chunk size must be positive and even (whole nucleotides per chunk).
    #[error("invalid chunk size: {bits} bits (must be positive and even)")]
    InvalidChunkSize {
        /// The configured chunk size in bits.
        bits: usize,
    },

    /// Invalid framed-stream seed width.
    #[error("invalid seed width: {seed_symbols} symbols (must be in 1..=32)")]
    InvalidSeedWidth {
        /// Configured seed width in symbols.
        seed_symbols: usize,
    },
}

/// Encode errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Invalid session configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Empty messages cannot be encoded.
    #[error("cannot encode empty message")]
    EmptyMessage,

    /// Seed does not fit the configured framed-stream seed width.
    #[error("seed {seed} does not fit in {seed_symbols} symbols")]
    SeedOverflow {
        /// The droplet seed.
        seed: u64,
        /// Configured seed width in symbols.
        seed_symbols: usize,
    },

    /// Chunk selection failed.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Symbol mapping failed.
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}

/// Decode errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Invalid session configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Droplet payload length does not match the session chunk size.
    ///
    /// Indicates mismatched session metadata between encoder and decoder.
    #[error("droplet {seed} payload is {got} bits, session chunk size is {expected} bits")]
    PayloadSizeMismatch {
        /// Seed of the offending droplet.
        seed: u64,
        /// Expected payload length in bits.
        expected: usize,
        /// Actual payload length in bits.
        got: usize,
    },

    /// A droplet's payload contradicts already-resolved chunk values.
    ///
    /// Only raised in strict mode; signals corrupted input.
    #[error("droplet {seed} contradicts resolved chunks")]
    IntegrityMismatch {
        /// Seed of the offending droplet.
        seed: u64,
    },

    /// Decoding stalled with chunks still unresolved.
    ///
    /// Recoverable: the droplet sequence is regenerable by seed, so the
    /// caller can supply droplets `N, N+1, ...` and decode again.
    #[error("insufficient droplets: {unresolved} of {chunk_count} chunks unresolved")]
    InsufficientDroplets {
        /// Number of chunks still unresolved.
        unresolved: usize,
        /// Total chunks in the session.
        chunk_count: usize,
    },

    /// Reassembly attempted before the session reached `Solved`.
    #[error("decode incomplete: message requested before all chunks resolved")]
    DecodeIncomplete,

    /// Chunk selection failed.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Symbol mapping failed.
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
