//! Test kit for the DNA fountain codec.
//!
//! This crate provides the utilities the codec's integration tests and the
//! CLI self-test share:
//!
//! - [`FountainTestHarness`] - drives full encode/decode runs with recording
//! - Fixtures: the reference sample messages and session configurations
//! - Tracing configuration for test output
//!
//! # Example
//!
//! ```rust,ignore
//! use dnaf_testkit::{fixtures, FountainTestHarness};
//!
//! #[test]
//! fn samples_round_trip() {
//!     dnaf_testkit::init_test_tracing();
//!
//!     let mut harness = FountainTestHarness::new(fixtures::sample_config());
//!     for message in fixtures::sample_messages() {
//!         harness.run_framed(&message).unwrap();
//!         harness.assert_last_success();
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod fixtures;
mod harness;
mod tracing_config;

pub use harness::*;
pub use tracing_config::*;

// Re-export codec types for convenience
pub use dnaf_codec::{DecodeError, EncodeError, FountainConfig};
