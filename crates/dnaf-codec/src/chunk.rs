//! Message splitting and reassembly.
//!
//! A message becomes `ceil(message_bits / chunk_size_bits)` fixed-size
//! chunks, the last one zero-padded. Padding is only reversible because the
//! original byte length travels as out-of-band session metadata next to the
//! droplet stream; it is never part of droplet content.

use crate::bits::BitString;
use crate::error::{ConfigError, EncodeError};

/// Split a message into fixed-size chunks, zero-padding the tail.
///
/// # Errors
///
/// Returns `ConfigError::InvalidChunkSize` if `chunk_size_bits` is zero or
/// odd, and `EncodeError::EmptyMessage` for an empty message.
pub fn split(message: &[u8], chunk_size_bits: usize) -> Result<Vec<BitString>, EncodeError> {
    if chunk_size_bits == 0 || chunk_size_bits % 2 != 0 {
        return Err(ConfigError::InvalidChunkSize {
            bits: chunk_size_bits,
        }
        .into());
    }
    if message.is_empty() {
        return Err(EncodeError::EmptyMessage);
    }

    let mut bits = BitString::from_bytes(message);
    while bits.len() % chunk_size_bits != 0 {
        bits.push(false);
    }

    let chunks = (0..bits.len() / chunk_size_bits)
        .map(|i| bits.slice(i * chunk_size_bits, chunk_size_bits))
        .collect();
    Ok(chunks)
}

/// Concatenate resolved chunks in index order and strip padding.
///
/// `original_byte_len` is the session's out-of-band length metadata.
#[must_use]
pub fn reassemble(chunks: &[BitString], original_byte_len: usize) -> Vec<u8> {
    let mut bits = BitString::new();
    for chunk in chunks {
        bits.extend(chunk);
    }
    let mut bytes = bits.as_bytes().to_vec();
    bytes.truncate(original_byte_len);
    bytes
}
