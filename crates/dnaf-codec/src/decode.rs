//! Peeling decoder.
//!
//! The decoder owns an arena of droplet slots for the lifetime of one
//! session. Each slot tracks its residual source set (indices not yet
//! resolved) and residual payload (payload XORed with every already-applied
//! resolved chunk); the invariant throughout is that a residual payload
//! equals the XOR of its still-unresolved chunks' true values. Resolution is
//! a worklist algorithm: slots that reach residual degree 1 are queued, each
//! resolution propagates through a per-chunk reverse index rather than a full
//! rescan.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::bits::BitString;
use crate::chunk;
use crate::config::FountainConfig;
use crate::degree::DegreeTable;
use crate::droplet::EncodedDroplet;
use crate::error::DecodeError;
use crate::select;

/// Decoding session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeState {
    /// Still ingesting droplets; chunks remain unresolved.
    Collecting,
    /// Every chunk is resolved.
    Solved,
    /// Droplet supply exhausted with chunks unresolved. Terminal for the
    /// current droplet set; more droplets may still rescue the session.
    Stalled,
}

/// A live droplet: residual source set and residual payload.
struct Slot {
    seed: u64,
    residual: Vec<usize>,
    payload: BitString,
    live: bool,
}

/// Peeling decoder for one fountain session.
pub struct FountainDecoder {
    table: DegreeTable,
    chunk_size_bits: usize,
    strict: bool,
    resolved: Vec<Option<BitString>>,
    resolved_count: usize,
    slots: Vec<Slot>,
    /// Chunk index -> slots whose residual set contains it.
    watchers: Vec<Vec<usize>>,
    /// Slots at residual degree 1, pending resolution.
    ready: VecDeque<usize>,
    seen: HashSet<u64>,
    stalled: bool,
}

impl FountainDecoder {
    /// Create a decoder expecting `chunk_count` chunks.
    ///
    /// `chunk_count` must match the encoding session; a mismatch shows up as
    /// garbage selections, which is why it travels as session metadata.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Config` for an invalid session configuration and
    /// `DecodeError::Select` for a zero chunk count. Validation runs on both
    /// sides of a session; an invalid decode-side configuration is rejected
    /// here rather than silently accepting malformed droplets.
    pub fn new(chunk_count: usize, config: &FountainConfig) -> Result<Self, DecodeError> {
        config.validate()?;
        let table = DegreeTable::new(chunk_count)?;
        Ok(Self {
            table,
            chunk_size_bits: config.chunk_size_bits,
            strict: config.strict_integrity,
            resolved: vec![None; chunk_count],
            resolved_count: 0,
            slots: Vec::new(),
            watchers: vec![Vec::new(); chunk_count],
            ready: VecDeque::new(),
            seen: HashSet::new(),
            stalled: false,
        })
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> DecodeState {
        if self.resolved_count == self.chunk_count() {
            DecodeState::Solved
        } else if self.stalled {
            DecodeState::Stalled
        } else {
            DecodeState::Collecting
        }
    }

    /// Number of chunks the session expects.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.resolved.len()
    }

    /// Number of chunks still unresolved.
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.resolved.len() - self.resolved_count
    }

    /// Ingest one droplet and run resolution to its fixed point.
    ///
    /// Duplicate seeds are skipped idempotently. New droplets clear a prior
    /// stall: supplying more of the stream is the documented recovery path.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::PayloadSizeMismatch` if the payload length does
    /// not match the session chunk size, and `DecodeError::IntegrityMismatch`
    /// in strict mode when a droplet contradicts resolved chunks.
    pub fn push(&mut self, seed: u64, payload: BitString) -> Result<DecodeState, DecodeError> {
        if payload.len() != self.chunk_size_bits {
            return Err(DecodeError::PayloadSizeMismatch {
                seed,
                expected: self.chunk_size_bits,
                got: payload.len(),
            });
        }
        if !self.seen.insert(seed) {
            return Ok(self.state());
        }
        self.stalled = false;

        let selection = select::select(seed, &self.table)?;

        // Fold already-resolved chunks into the payload up front so the slot
        // starts at its true residual degree.
        let mut payload = payload;
        let mut residual = Vec::with_capacity(selection.degree);
        for &index in &selection.indices {
            if let Some(value) = &self.resolved[index] {
                payload.xor_in_place(value);
            } else {
                residual.push(index);
            }
        }

        if residual.is_empty() {
            // Carries no new information; its payload must reduce to zero.
            if self.strict && !payload.is_zero() {
                return Err(DecodeError::IntegrityMismatch { seed });
            }
            return Ok(self.state());
        }

        let slot_id = self.slots.len();
        let degree_one = residual.len() == 1;
        for &index in &residual {
            self.watchers[index].push(slot_id);
        }
        self.slots.push(Slot {
            seed,
            residual,
            payload,
            live: true,
        });
        if degree_one {
            self.ready.push_back(slot_id);
            self.propagate()?;
        }

        Ok(self.state())
    }

    /// Drain the worklist: resolve each degree-1 slot and propagate the
    /// resolved value to every slot watching that chunk.
    fn propagate(&mut self) -> Result<(), DecodeError> {
        while let Some(slot_id) = self.ready.pop_front() {
            let slot = &mut self.slots[slot_id];
            if !slot.live || slot.residual.len() != 1 {
                continue;
            }
            let chunk_index = slot.residual[0];
            let seed = slot.seed;
            slot.live = false;
            let value = std::mem::take(&mut slot.payload);
            debug_assert!(self.resolved[chunk_index].is_none());
            self.resolved[chunk_index] = Some(value.clone());
            self.resolved_count += 1;

            debug!(
                chunk_index,
                seed,
                resolved = self.resolved_count,
                chunk_count = self.chunk_count(),
                "chunk resolved"
            );

            for watcher_id in std::mem::take(&mut self.watchers[chunk_index]) {
                if watcher_id == slot_id || !self.slots[watcher_id].live {
                    continue;
                }
                let watcher = &mut self.slots[watcher_id];
                watcher.payload.xor_in_place(&value);
                watcher.residual.retain(|&i| i != chunk_index);
                match watcher.residual.len() {
                    0 => {
                        if self.strict && !watcher.payload.is_zero() {
                            return Err(DecodeError::IntegrityMismatch {
                                seed: watcher.seed,
                            });
                        }
                        watcher.live = false;
                    }
                    1 => self.ready.push_back(watcher_id),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Declare the droplet supply exhausted.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InsufficientDroplets` if chunks remain
    /// unresolved; the session enters `Stalled` and reports how many.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        if self.resolved_count == self.chunk_count() {
            return Ok(());
        }
        self.stalled = true;
        Err(DecodeError::InsufficientDroplets {
            unresolved: self.unresolved(),
            chunk_count: self.chunk_count(),
        })
    }

    /// Reassemble the message. Requires `Solved`.
    ///
    /// `original_byte_len` is the session's out-of-band length metadata.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::DecodeIncomplete` unless every chunk is
    /// resolved.
    pub fn message(&self, original_byte_len: usize) -> Result<Vec<u8>, DecodeError> {
        if self.state() != DecodeState::Solved {
            return Err(DecodeError::DecodeIncomplete);
        }
        // Solved guarantees every chunk is resolved; never substitute a
        // default value for a missing one.
        let chunks: Vec<BitString> = self
            .resolved
            .iter()
            .map(|c| c.clone().ok_or(DecodeError::DecodeIncomplete))
            .collect::<Result<_, _>>()?;
        Ok(chunk::reassemble(&chunks, original_byte_len))
    }
}

/// Decode a droplet stream back into the original message.
///
/// `chunk_count` and `original_byte_len` are the session's out-of-band
/// metadata. Droplets are consumed in order; once the session solves, the
/// remainder is skipped unless strict integrity checking is on.
///
/// # Errors
///
/// Returns `DecodeError::InsufficientDroplets` if the stream is exhausted
/// with chunks unresolved, plus the ingestion errors documented on
/// [`FountainDecoder::push`].
pub fn decode(
    droplets: &[EncodedDroplet],
    chunk_count: usize,
    original_byte_len: usize,
    config: &FountainConfig,
) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = FountainDecoder::new(chunk_count, config)?;
    for encoded in droplets {
        let droplet = encoded.to_droplet()?;
        let state = decoder.push(droplet.seed, droplet.payload)?;
        if state == DecodeState::Solved && !config.strict_integrity {
            break;
        }
    }
    decoder.finish()?;
    decoder.message(original_byte_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode, FountainEncoder};

    fn test_config() -> FountainConfig {
        FountainConfig::default()
    }

    fn encode_session(
        message: &[u8],
        config: &FountainConfig,
    ) -> (Vec<EncodedDroplet>, usize) {
        let chunk_count = config.chunk_count(message.len());
        let droplets = encode(message, config, config.droplet_count(chunk_count)).unwrap();
        (droplets, chunk_count)
    }

    #[test]
    fn round_trip_byte_chunks() {
        let config = test_config();
        let message = b"peeling decoder round trip";
        let (droplets, chunk_count) = encode_session(message, &config);

        let decoded = decode(&droplets, chunk_count, message.len(), &config).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn round_trip_sub_byte_chunks() {
        let config = FountainConfig {
            chunk_size_bits: 4,
            ..test_config()
        };
        let message = [0xAB, 0xCD, 0xEF];
        let (droplets, chunk_count) = encode_session(&message, &config);
        assert_eq!(chunk_count, 6);

        let decoded = decode(&droplets, chunk_count, message.len(), &config).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn zero_droplets_always_stall() {
        let config = test_config();
        let mut decoder = FountainDecoder::new(4, &config).unwrap();
        assert_eq!(decoder.state(), DecodeState::Collecting);

        let err = decoder.finish().unwrap_err();
        assert_eq!(
            err,
            DecodeError::InsufficientDroplets {
                unresolved: 4,
                chunk_count: 4,
            }
        );
        assert_eq!(decoder.state(), DecodeState::Stalled);
    }

    #[test]
    fn stall_then_recover_with_more_droplets() {
        let config = test_config();
        let message = [0x0F, 0xF0, 0xAA, 0x55];
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let mut decoder = FountainDecoder::new(4, &config).unwrap();

        // First three droplets of this stream are not enough.
        for seed in 0..3 {
            let droplet = encoder.droplet(seed).unwrap();
            decoder.push(droplet.seed, droplet.payload).unwrap();
        }
        assert!(matches!(
            decoder.finish(),
            Err(DecodeError::InsufficientDroplets { .. })
        ));
        assert_eq!(decoder.state(), DecodeState::Stalled);

        // The stream is regenerable by seed: keep going where we left off.
        for seed in 3..10 {
            let droplet = encoder.droplet(seed).unwrap();
            decoder.push(droplet.seed, droplet.payload).unwrap();
        }
        assert_eq!(decoder.state(), DecodeState::Solved);
        decoder.finish().unwrap();
        assert_eq!(decoder.message(4).unwrap(), message);
    }

    #[test]
    fn duplicate_droplets_are_idempotent() {
        let config = test_config();
        let message = b"strict";
        let (droplets, chunk_count) = encode_session(message, &config);

        let mut with_duplicates = droplets.clone();
        with_duplicates.insert(3, droplets[2].clone());
        with_duplicates.push(droplets[0].clone());

        let a = decode(&droplets, chunk_count, message.len(), &config).unwrap();
        let b = decode(&with_duplicates, chunk_count, message.len(), &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, message);
    }

    #[test]
    fn duplicate_seed_does_not_advance_state() {
        let config = test_config();
        let message = b"hello fountain";
        let encoder = FountainEncoder::new(message, &config).unwrap();
        let mut decoder =
            FountainDecoder::new(encoder.chunk_count(), &config).unwrap();

        let droplet = encoder.droplet(0).unwrap();
        decoder.push(droplet.seed, droplet.payload.clone()).unwrap();
        let before = decoder.unresolved();
        decoder.push(droplet.seed, droplet.payload).unwrap();
        assert_eq!(decoder.unresolved(), before);
    }

    #[test]
    fn invalid_chunk_size_rejected_on_decode_side() {
        // A zero chunk size must fail at construction; it must never let
        // empty-payload droplets drive the session to Solved and truncate
        // the message to nothing.
        let config = FountainConfig {
            chunk_size_bits: 0,
            ..test_config()
        };
        assert!(matches!(
            FountainDecoder::new(4, &config),
            Err(DecodeError::Config(
                crate::ConfigError::InvalidChunkSize { bits: 0 }
            ))
        ));
        assert!(matches!(
            decode(&[], 4, 4, &config),
            Err(DecodeError::Config(
                crate::ConfigError::InvalidChunkSize { bits: 0 }
            ))
        ));

        let config = FountainConfig {
            chunk_size_bits: 5,
            ..test_config()
        };
        assert!(matches!(
            FountainDecoder::new(4, &config),
            Err(DecodeError::Config(
                crate::ConfigError::InvalidChunkSize { bits: 5 }
            ))
        ));
    }

    #[test]
    fn payload_size_mismatch_rejected() {
        let config = test_config();
        let mut decoder = FountainDecoder::new(4, &config).unwrap();
        let err = decoder
            .push(0, BitString::from_bytes(&[0xAA, 0xBB]))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::PayloadSizeMismatch {
                seed: 0,
                expected: 8,
                got: 16,
            }
        );
    }

    #[test]
    fn message_before_solved_is_incomplete() {
        let config = test_config();
        let decoder = FountainDecoder::new(4, &config).unwrap();
        assert!(matches!(
            decoder.message(4),
            Err(DecodeError::DecodeIncomplete)
        ));
    }

    #[test]
    fn strict_mode_flags_contradicting_droplet() {
        let config = FountainConfig {
            strict_integrity: true,
            ..test_config()
        };
        let message = [0x0F, 0xF0, 0xAA, 0x55];
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let mut decoder = FountainDecoder::new(4, &config).unwrap();

        // Enough droplets to solve the session.
        for seed in 0..7 {
            let droplet = encoder.droplet(seed).unwrap();
            decoder.push(droplet.seed, droplet.payload).unwrap();
        }
        assert_eq!(decoder.state(), DecodeState::Solved);

        // A corrupted redundant droplet must contradict the resolved chunks.
        let mut corrupt = encoder.droplet(7).unwrap();
        corrupt.payload.xor_in_place(&BitString::from_bytes(&[0x01]));
        let err = decoder.push(corrupt.seed, corrupt.payload).unwrap_err();
        assert_eq!(err, DecodeError::IntegrityMismatch { seed: 7 });
    }

    #[test]
    fn lenient_mode_drops_contradicting_droplet() {
        let config = test_config();
        let message = [0x0F, 0xF0, 0xAA, 0x55];
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let mut decoder = FountainDecoder::new(4, &config).unwrap();

        for seed in 0..7 {
            let droplet = encoder.droplet(seed).unwrap();
            decoder.push(droplet.seed, droplet.payload).unwrap();
        }
        let mut corrupt = encoder.droplet(7).unwrap();
        corrupt.payload.xor_in_place(&BitString::from_bytes(&[0x01]));
        decoder.push(corrupt.seed, corrupt.payload).unwrap();

        assert_eq!(decoder.message(4).unwrap(), message);
    }

    #[test]
    fn resolved_chunks_never_regress() {
        let config = test_config();
        let message = b"streaming fountain frame";
        let encoder = FountainEncoder::new(message, &config).unwrap();
        let mut decoder =
            FountainDecoder::new(encoder.chunk_count(), &config).unwrap();

        let mut resolved_so_far = 0;
        for droplet in encoder.droplets().take(100) {
            let droplet = droplet.unwrap();
            decoder.push(droplet.seed, droplet.payload).unwrap();
            let now = encoder.chunk_count() - decoder.unresolved();
            assert!(now >= resolved_so_far);
            resolved_so_far = now;
            if decoder.state() == DecodeState::Solved {
                break;
            }
        }
        assert_eq!(decoder.state(), DecodeState::Solved);
        assert_eq!(decoder.message(message.len()).unwrap(), message);
    }
}
