//! Test harness for fountain codec round trips.
//!
//! The [`FountainTestHarness`] drives full encode/decode runs and provides:
//! - Automatic logging and run recording
//! - The stall recovery loop (extend the droplet stream by seed and retry)
//! - Built-in assertions over recorded runs

use std::time::Instant;

use dnaf_codec::{decode, encode, frame_stream, parse_stream, FountainConfig};
use dnaf_codec::{DecodeError, EncodeError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a harness run, spanning both codec stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// The encode stage failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The decode stage failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Recorded run for test inspection.
#[derive(Debug, Clone)]
pub struct RecordedRun {
    /// Run name
    pub operation: String,
    /// Input parameters (as JSON)
    pub input: Option<serde_json::Value>,
    /// Result (success value or error message)
    pub result: Result<serde_json::Value, String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

struct Outcome {
    decoded: Vec<u8>,
    droplet_count: usize,
}

/// Test harness that drives fountain codec round trips.
///
/// Provides:
/// - Run recording for assertions
/// - Timing measurements
/// - Convenience methods for the droplet-record and framed-string paths
pub struct FountainTestHarness {
    config: FountainConfig,
    runs: Vec<RecordedRun>,
}

impl FountainTestHarness {
    /// Create a harness for the given session configuration.
    #[must_use]
    pub const fn new(config: FountainConfig) -> Self {
        Self {
            config,
            runs: Vec::new(),
        }
    }

    /// The harness session configuration.
    #[must_use]
    pub const fn config(&self) -> &FountainConfig {
        &self.config
    }

    /// Get all recorded runs.
    #[must_use]
    pub fn runs(&self) -> &[RecordedRun] {
        &self.runs
    }

    /// Get the last recorded run.
    #[must_use]
    pub fn last_run(&self) -> Option<&RecordedRun> {
        self.runs.last()
    }

    /// Clear recorded runs.
    pub fn clear_runs(&mut self) {
        self.runs.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round trips
    // ─────────────────────────────────────────────────────────────────────────

    /// Round-trip a message through droplet records.
    ///
    /// Starts at the configured droplet count and, if decoding stalls,
    /// regenerates a larger droplet set by seed and retries.
    ///
    /// # Errors
    ///
    /// Returns the codec error if encoding fails or decoding fails for a
    /// reason other than a recoverable stall.
    pub fn run_message(&mut self, message: &[u8]) -> Result<Vec<u8>, HarnessError> {
        let start = Instant::now();
        let outcome = self.round_trip(message);
        self.record("round_trip", message, &outcome, start);
        outcome.map(|o| o.decoded)
    }

    /// Round-trip a message with a fixed droplet count, no stall recovery.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InsufficientDroplets` when the fixed budget does
    /// not solve the session, or any other codec error.
    pub fn run_message_with_droplets(
        &mut self,
        message: &[u8],
        droplet_count: usize,
    ) -> Result<Vec<u8>, HarnessError> {
        let start = Instant::now();
        let outcome = self.single_attempt(message, droplet_count);
        self.record("round_trip_fixed", message, &outcome, start);
        outcome.map(|o| o.decoded)
    }

    /// Round-trip a message through one framed nucleotide string.
    ///
    /// Same recovery loop as [`run_message`](Self::run_message), but the
    /// droplet stream travels through [`frame_stream`] and [`parse_stream`]
    /// in between.
    ///
    /// # Errors
    ///
    /// Returns the codec error if any stage fails for a reason other than a
    /// recoverable stall.
    pub fn run_framed(&mut self, message: &[u8]) -> Result<Vec<u8>, HarnessError> {
        let start = Instant::now();
        let outcome = self.framed_round_trip(message);
        self.record("framed_round_trip", message, &outcome, start);
        outcome.map(|o| o.decoded)
    }

    /// Round-trip every sample message through both transport paths.
    ///
    /// # Errors
    ///
    /// Returns the first codec error encountered.
    pub fn run_all_samples(&mut self) -> Result<(), HarnessError> {
        for message in crate::fixtures::sample_messages() {
            info!(message_hex = %hex::encode(&message), "testing sample message");
            self.run_message(&message)?;
            self.run_framed(&message)?;
        }
        Ok(())
    }

    fn round_trip(&self, message: &[u8]) -> Result<Outcome, HarnessError> {
        let chunk_count = self.config.chunk_count(message.len());
        let mut droplet_count = self.config.droplet_count(chunk_count);
        loop {
            let droplets = encode(message, &self.config, droplet_count)?;
            match decode(&droplets, chunk_count, message.len(), &self.config) {
                Ok(decoded) => {
                    return Ok(Outcome {
                        decoded,
                        droplet_count,
                    })
                }
                Err(DecodeError::InsufficientDroplets { unresolved, .. })
                    if droplet_count < chunk_count * 64 =>
                {
                    debug!(unresolved, droplet_count, "decode stalled, extending stream");
                    droplet_count *= 2;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn framed_round_trip(&self, message: &[u8]) -> Result<Outcome, HarnessError> {
        let chunk_count = self.config.chunk_count(message.len());
        let mut droplet_count = self.config.droplet_count(chunk_count);
        loop {
            let droplets = encode(message, &self.config, droplet_count)?;
            let stream = frame_stream(&droplets, &self.config)?;
            let parsed = parse_stream(&stream, &self.config)?;
            match decode(&parsed, chunk_count, message.len(), &self.config) {
                Ok(decoded) => {
                    return Ok(Outcome {
                        decoded,
                        droplet_count,
                    })
                }
                Err(DecodeError::InsufficientDroplets { unresolved, .. })
                    if droplet_count < chunk_count * 64 =>
                {
                    debug!(unresolved, droplet_count, "decode stalled, extending stream");
                    droplet_count *= 2;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn single_attempt(
        &self,
        message: &[u8],
        droplet_count: usize,
    ) -> Result<Outcome, HarnessError> {
        let chunk_count = self.config.chunk_count(message.len());
        let droplets = encode(message, &self.config, droplet_count)?;
        let decoded = decode(&droplets, chunk_count, message.len(), &self.config)?;
        Ok(Outcome {
            decoded,
            droplet_count,
        })
    }

    fn record(
        &mut self,
        operation: &str,
        message: &[u8],
        outcome: &Result<Outcome, HarnessError>,
        start: Instant,
    ) {
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.runs.push(RecordedRun {
            operation: operation.to_string(),
            input: Some(serde_json::json!({
                "message_hex": hex::encode(message),
                "chunk_size_bits": self.config.chunk_size_bits,
            })),
            result: match outcome {
                Ok(outcome) => Ok(serde_json::json!({
                    "decoded_hex": hex::encode(&outcome.decoded),
                    "droplet_count": outcome.droplet_count,
                })),
                Err(err) => Err(err.to_string()),
            },
            duration_ms,
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Assertions
    // ─────────────────────────────────────────────────────────────────────────

    /// Assert that the last run succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the last run failed or no runs were recorded.
    pub fn assert_last_success(&self) {
        let run = self.last_run().expect("no runs recorded");
        assert!(run.result.is_ok(), "last run failed: {:?}", run.result);
    }

    /// Assert that the last run failed.
    ///
    /// # Panics
    ///
    /// Panics if the last run succeeded or no runs were recorded.
    pub fn assert_last_failure(&self) {
        let run = self.last_run().expect("no runs recorded");
        assert!(
            run.result.is_err(),
            "expected failure but got: {:?}",
            run.result
        );
    }

    /// Assert total run count.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_run_count(&self, expected: usize) {
        assert_eq!(
            self.runs.len(),
            expected,
            "expected {} runs but got {}",
            expected,
            self.runs.len()
        );
    }

    /// Get statistics about recorded runs.
    #[must_use]
    pub fn stats(&self) -> HarnessStats {
        let total = self.runs.len();
        let successes = self.runs.iter().filter(|run| run.result.is_ok()).count();
        let failures = total - successes;
        let total_duration_ms: u64 = self.runs.iter().map(|run| run.duration_ms).sum();
        let max_duration_ms = self
            .runs
            .iter()
            .map(|run| run.duration_ms)
            .max()
            .unwrap_or(0);

        HarnessStats {
            total_runs: total,
            successes,
            failures,
            total_duration_ms,
            max_duration_ms,
        }
    }
}

/// Statistics about harness runs.
#[derive(Debug, Clone)]
pub struct HarnessStats {
    /// Total runs executed
    pub total_runs: usize,
    /// Successful runs
    pub successes: usize,
    /// Failed runs
    pub failures: usize,
    /// Total duration in milliseconds
    pub total_duration_ms: u64,
    /// Maximum run duration in milliseconds
    pub max_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    const REFERENCE: [u8; 4] = [0x0F, 0xF0, 0xAA, 0x55];

    #[test]
    fn reference_message_round_trips() {
        let mut harness = FountainTestHarness::new(fixtures::byte_config());
        let decoded = harness.run_message(&REFERENCE).unwrap();
        assert_eq!(decoded, REFERENCE);
        harness.assert_last_success();
    }

    #[test]
    fn framed_path_matches_droplet_path() {
        let mut harness = FountainTestHarness::new(fixtures::sample_config());
        let a = harness.run_message(&REFERENCE).unwrap();
        let b = harness.run_framed(&REFERENCE).unwrap();
        assert_eq!(a, b);
        harness.assert_run_count(2);
    }

    #[test]
    fn fixed_budget_stall_is_recorded_as_failure() {
        let mut harness = FountainTestHarness::new(fixtures::byte_config());
        let result = harness.run_message_with_droplets(&REFERENCE, 3);
        assert!(matches!(
            result,
            Err(HarnessError::Decode(
                DecodeError::InsufficientDroplets { .. }
            ))
        ));
        harness.assert_last_failure();
        assert_eq!(harness.stats().failures, 1);
    }

    #[test]
    fn all_samples_round_trip_on_both_paths() {
        crate::init_test_tracing_silent();
        let mut harness = FountainTestHarness::new(fixtures::sample_config());
        harness.run_all_samples().unwrap();
        harness.assert_run_count(24);

        let stats = harness.stats();
        assert_eq!(stats.successes, 24);
        assert_eq!(stats.failures, 0);
    }

    #[test]
    fn recorded_run_carries_input_and_result() {
        let mut harness = FountainTestHarness::new(fixtures::byte_config());
        harness.run_message(&REFERENCE).unwrap();

        let run = harness.last_run().unwrap();
        assert_eq!(run.operation, "round_trip");
        let input = run.input.as_ref().unwrap();
        assert_eq!(input["message_hex"], "0ff0aa55");
        let result = run.result.as_ref().unwrap();
        assert_eq!(result["decoded_hex"], "0ff0aa55");
    }
}
