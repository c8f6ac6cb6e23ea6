//! DNA fountain encoding/decoding.
//!
//! This crate implements an erasure-resilient fountain code whose output
//! alphabet is the four nucleotides `A`, `C`, `G`, `T`. A message is split
//! into fixed-size chunks; each droplet XORs a pseudo-random subset of chunks
//! and is transmitted as a nucleotide sequence together with the seed that
//! reproduces the subset.
//!
//! # Overview
//!
//! - Any sufficiently large droplet set reconstructs the original message -
//!   no individual chunk has to survive transmission
//! - Droplet generation is a pure function of `(seed, chunk_count)`, so lost
//!   droplets are regenerable on demand and never require coordination
//! - The degree distribution is robust-soliton shaped: plenty of degree-1
//!   droplets to start the peeling decoder, a long tail for coverage
//! - The chunk selection PRNG is pinned to SplitMix64 so encoder and decoder
//!   builds interoperate regardless of platform or standard library
//!
//! # Session metadata
//!
//! `chunk_size_bits`, `chunk_count`, and the original byte length are
//! out-of-band session metadata: they must travel next to the droplet stream.
//! Padding is only reversible because the decoder knows the byte length.

#![forbid(unsafe_code)]

mod bits;
mod chunk;
mod config;
mod decode;
mod degree;
mod droplet;
mod encode;
mod error;
mod golden;
mod rng;
mod select;
mod stream;
mod symbol;

pub use bits::BitString;
pub use config::FountainConfig;
pub use decode::{decode, DecodeState, FountainDecoder};
pub use degree::DegreeTable;
pub use droplet::{Droplet, EncodedDroplet};
pub use encode::{encode, Droplets, FountainEncoder};
pub use error::{ConfigError, DecodeError, EncodeError, SelectError, SymbolError};
pub use select::{select, Selection};
pub use stream::{frame_stream, parse_stream};
pub use symbol::{to_bits, to_symbols, ALPHABET};
