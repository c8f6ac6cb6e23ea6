//! Droplet degree distribution.
//!
//! The degree of a droplet is the number of chunks XORed into it. The table
//! is a robust-soliton shaped distribution: degree 1 gets a meaningful share
//! so the peeling decoder can start, a spike near `k/R` keeps the ripple
//! alive, and a thin tail up to `chunk_count` covers rarely-hit chunks.
//!
//! The table is an immutable per-session value built once from `chunk_count`
//! and passed into the selector - there is no hidden global state. Both sides
//! of a session must build it from the same `chunk_count`.

// Allow precision-loss casts - threshold construction is approximate by design
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::error::SelectError;

/// Robust soliton tunables. The exact curve is a design parameter; these
/// values keep small sessions decodable at the default 3x redundancy.
const SPIKE_C: f64 = 0.2;
const FAILURE_DELTA: f64 = 0.05;

/// Monotone step function from a `u64` draw to a degree in `[1, chunk_count]`.
#[derive(Clone, Debug)]
pub struct DegreeTable {
    chunk_count: usize,
    /// `thresholds[d - 1]` is the exclusive upper bound of the draw range
    /// mapping to degree `d`; the last entry is `u64::MAX`.
    thresholds: Vec<u64>,
}

impl DegreeTable {
    /// Build the degree table for a session of `chunk_count` chunks.
    ///
    /// # Errors
    ///
    /// Returns `SelectError::ZeroChunkCount` if `chunk_count` is zero.
    pub fn new(chunk_count: usize) -> Result<Self, SelectError> {
        if chunk_count == 0 {
            return Err(SelectError::ZeroChunkCount);
        }

        let weights = Self::weights(chunk_count);
        let total: f64 = weights.iter().sum();

        let mut thresholds = Vec::with_capacity(chunk_count);
        let mut acc = 0.0_f64;
        for (i, w) in weights.iter().enumerate() {
            acc += w;
            if i == weights.len() - 1 {
                thresholds.push(u64::MAX);
            } else {
                thresholds.push((acc / total * u64::MAX as f64) as u64);
            }
        }

        Ok(Self {
            chunk_count,
            thresholds,
        })
    }

    /// Unnormalized robust soliton weights for degrees `1..=k`.
    fn weights(k: usize) -> Vec<f64> {
        if k == 1 {
            return vec![1.0];
        }

        let kf = k as f64;
        let r = SPIKE_C * (kf / FAILURE_DELTA).ln() * kf.sqrt();
        let spike = ((kf / r) as usize).clamp(1, k);

        (1..=k)
            .map(|d| {
                let rho = if d == 1 {
                    1.0 / kf
                } else {
                    1.0 / (d as f64 * (d as f64 - 1.0))
                };
                let tau = if d < spike {
                    r / (d as f64 * kf)
                } else if d == spike {
                    r * (r / FAILURE_DELTA).ln() / kf
                } else {
                    0.0
                };
                rho + tau
            })
            .collect()
    }

    /// Map a `u64` draw to a degree. Pure function of `(value, chunk_count)`.
    #[must_use]
    pub fn degree_for(&self, value: u64) -> usize {
        let idx = self.thresholds.partition_point(|&t| value >= t);
        (idx + 1).min(self.chunk_count)
    }

    /// Number of chunks this table was built for.
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunk_count
    }
}
