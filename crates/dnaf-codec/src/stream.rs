//! Framed single-string transport.
//!
//! A whole droplet stream can travel as one nucleotide string: each segment
//! is the seed, mapped to a fixed number of symbols, followed by the payload
//! symbols. Segment length is constant per session
//! (`seed_symbols + chunk_size_bits / 2`), so parsing is a fixed-stride walk;
//! a trailing partial segment is ignored.

use crate::bits::BitString;
use crate::config::FountainConfig;
use crate::droplet::EncodedDroplet;
use crate::error::{DecodeError, EncodeError};
use crate::symbol;

/// Serialize a droplet stream into one nucleotide string.
///
/// # Errors
///
/// Returns `EncodeError::SeedOverflow` if a seed does not fit the configured
/// `seed_symbols` width, and configuration errors from
/// [`FountainConfig::validate`].
pub fn frame_stream(
    droplets: &[EncodedDroplet],
    config: &FountainConfig,
) -> Result<String, EncodeError> {
    config.validate()?;
    let seed_bits = config.seed_symbols * 2;

    let mut out = String::with_capacity(droplets.len() * config.segment_symbols());
    for droplet in droplets {
        if seed_bits < 64 && droplet.seed >> seed_bits != 0 {
            return Err(EncodeError::SeedOverflow {
                seed: droplet.seed,
                seed_symbols: config.seed_symbols,
            });
        }
        let mut seed_field = BitString::new();
        for i in (0..seed_bits).rev() {
            seed_field.push(droplet.seed >> i & 1 == 1);
        }
        out.push_str(&symbol::to_symbols(&seed_field)?);
        out.push_str(&droplet.symbols);
    }
    Ok(out)
}

/// Parse a framed nucleotide string back into droplet records.
///
/// A trailing partial segment is skipped; corruption within a segment
/// surfaces as `InvalidSymbol` with its position inside the segment.
///
/// # Errors
///
/// Returns `DecodeError::Config` for an invalid session configuration (a
/// zero seed width would collapse every seed field) and `DecodeError::Symbol`
/// on any character outside the alphabet.
pub fn parse_stream(
    stream: &str,
    config: &FountainConfig,
) -> Result<Vec<EncodedDroplet>, DecodeError> {
    config.validate()?;
    let segment = config.segment_symbols();
    let chars: Vec<char> = stream.chars().collect();

    let mut droplets = Vec::with_capacity(chars.len() / segment);
    for window in chars.chunks_exact(segment) {
        let seed_part: String = window[..config.seed_symbols].iter().collect();
        let seed_bits = symbol::to_bits(&seed_part)?;
        let mut seed = 0_u64;
        for i in 0..seed_bits.len() {
            seed = seed << 1 | u64::from(seed_bits.bit(i));
        }

        let payload: String = window[config.seed_symbols..].iter().collect();
        // Validate payload symbols eagerly so corruption is caught at parse
        // time, not deep inside the decoder.
        symbol::to_bits(&payload)?;
        droplets.push(EncodedDroplet {
            seed,
            symbols: payload,
        });
    }
    Ok(droplets)
}
