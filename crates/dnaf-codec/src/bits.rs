//! Packed bit strings.
//!
//! Chunk sizes need not be byte-aligned, so chunks and droplet payloads are
//! bit strings: MSB-first packing over `Vec<u8>` with an explicit bit length.
//! Unused trailing bits of the last byte are always zero, which keeps
//! equality and byte-wise XOR honest.

use serde::{Deserialize, Serialize};

/// A fixed-length bit string, packed MSB-first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Create an empty bit string.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            len: 0,
        }
    }

    /// Create a bit string of `len` zero bits.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            bytes: vec![0; len.div_ceil(8)],
            len,
        }
    }

    /// Create a bit string from whole bytes (length is `bytes.len() * 8`).
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Length in bits.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check whether the bit string is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit at `index` (0 is the most significant bit of byte 0).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);
        self.bytes[index / 8] >> (7 - index % 8) & 1 == 1
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.len / 8] |= 1 << (7 - self.len % 8);
        }
        self.len += 1;
    }

    /// Append all bits of `other`.
    pub fn extend(&mut self, other: &Self) {
        for i in 0..other.len {
            self.push(other.bit(i));
        }
    }

    /// Copy out `len` bits starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start + len > self.len()`.
    #[must_use]
    pub fn slice(&self, start: usize, len: usize) -> Self {
        assert!(start + len <= self.len, "slice out of range");
        let mut out = Self::new();
        for i in start..start + len {
            out.push(self.bit(i));
        }
        out
    }

    /// XOR `other` into `self`. Both strings must have equal length; droplet
    /// payloads and chunks share the session chunk size by construction.
    pub fn xor_in_place(&mut self, other: &Self) {
        debug_assert_eq!(self.len, other.len, "xor of unequal bit strings");
        for (dst, src) in self.bytes.iter_mut().zip(&other.bytes) {
            *dst ^= src;
        }
    }

    /// Check whether every bit is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// The packed bytes, trailing bits of the last byte zero-filled.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Iterate over consecutive 2-bit groups, MSB-first, as values in `0..4`.
    ///
    /// A trailing odd bit is not yielded; callers that care check
    /// [`len`](Self::len) parity first.
    pub fn pair_values(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len / 2).map(|i| u8::from(self.bit(2 * i)) << 1 | u8::from(self.bit(2 * i + 1)))
    }

    /// Append a 2-bit group (value in `0..4`), MSB-first.
    pub fn push_pair(&mut self, value: u8) {
        debug_assert!(value < 4, "pair value out of range");
        self.push(value & 0b10 != 0);
        self.push(value & 0b01 != 0);
    }
}
