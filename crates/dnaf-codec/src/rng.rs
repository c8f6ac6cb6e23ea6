//! Seeded pseudo-random generator pinned to SplitMix64.
//!
//! Reproducibility across encoder and decoder builds is the linchpin of the
//! whole scheme, so the generator's transition function is spelled out here
//! rather than delegated to a standard library whose sequence is unspecified
//! across versions and platforms.

/// SplitMix64 generator (Steele, Lea, Flood; public domain reference
/// constants). State advances by the golden-gamma increment, outputs are the
/// finalized mix of the new state.
#[derive(Clone, Debug)]
pub(crate) struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    pub(crate) const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Unbiased draw in `0..n` via rejection sampling.
    ///
    /// `n` must be nonzero; callers draw within `1..=chunk_count` pools.
    pub(crate) fn next_below(&mut self, n: u64) -> u64 {
        debug_assert!(n > 0, "bounded draw over empty range");
        // Reject draws below 2^64 mod n so every residue is equally likely.
        let cutoff = n.wrapping_neg() % n;
        loop {
            let value = self.next_u64();
            if value >= cutoff {
                return value % n;
            }
        }
    }
}
