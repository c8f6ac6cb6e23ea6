//! Droplet encoder.

use tracing::debug;

use crate::bits::BitString;
use crate::chunk;
use crate::config::FountainConfig;
use crate::degree::DegreeTable;
use crate::droplet::{Droplet, EncodedDroplet};
use crate::error::EncodeError;
use crate::select;

/// Fountain encoder for producing droplets from a message.
///
/// Holds the session's chunk set and degree table. `droplet` is a pure
/// function of the seed, so the droplet sequence is unbounded, restartable,
/// and regenerable on demand - the caller decides how many to materialize.
pub struct FountainEncoder {
    chunks: Vec<BitString>,
    table: DegreeTable,
    chunk_size_bits: usize,
}

impl FountainEncoder {
    /// Create an encoder for a message.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::Config` or `EncodeError::EmptyMessage` for
    /// invalid session setup.
    pub fn new(message: &[u8], config: &FountainConfig) -> Result<Self, EncodeError> {
        config.validate()?;
        let chunks = chunk::split(message, config.chunk_size_bits)?;
        let table = DegreeTable::new(chunks.len())?;

        debug!(
            message_len = message.len(),
            chunk_count = chunks.len(),
            chunk_size_bits = config.chunk_size_bits,
            "fountain encoder ready"
        );

        Ok(Self {
            chunks,
            table,
            chunk_size_bits: config.chunk_size_bits,
        })
    }

    /// Number of source chunks.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Session chunk size in bits.
    #[must_use]
    pub const fn chunk_size_bits(&self) -> usize {
        self.chunk_size_bits
    }

    /// Produce the droplet for `seed`.
    ///
    /// The same seed always yields the same record for the same chunk set.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::Select` if the degree table violates its
    /// contract (defensive; unreachable for a valid table).
    pub fn droplet(&self, seed: u64) -> Result<Droplet, EncodeError> {
        let selection = select::select(seed, &self.table)?;

        let mut payload = self.chunks[selection.indices[0]].clone();
        for &index in &selection.indices[1..] {
            payload.xor_in_place(&self.chunks[index]);
        }

        Ok(Droplet { seed, payload })
    }

    /// Lazy unbounded droplet sequence, seeds `0, 1, 2, ...`.
    #[must_use]
    pub const fn droplets(&self) -> Droplets<'_> {
        Droplets {
            encoder: self,
            next_seed: 0,
        }
    }
}

/// Unbounded iterator over the seed-ordered droplet sequence.
pub struct Droplets<'a> {
    encoder: &'a FountainEncoder,
    next_seed: u64,
}

impl Iterator for Droplets<'_> {
    type Item = Result<Droplet, EncodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let seed = self.next_seed;
        self.next_seed += 1;
        Some(self.encoder.droplet(seed))
    }
}

/// Encode a message into `droplet_count` externally-transmissible droplets.
///
/// How many droplets to materialize is the caller's policy;
/// [`FountainConfig::droplet_count`] gives the configured default.
///
/// # Errors
///
/// Returns `EncodeError` for invalid session setup.
pub fn encode(
    message: &[u8],
    config: &FountainConfig,
    droplet_count: usize,
) -> Result<Vec<EncodedDroplet>, EncodeError> {
    let encoder = FountainEncoder::new(message, config)?;
    encoder
        .droplets()
        .take(droplet_count)
        .map(|droplet| droplet?.to_symbols())
        .collect()
}
