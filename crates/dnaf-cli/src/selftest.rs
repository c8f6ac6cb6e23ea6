//! `dnaf selftest` command implementation.
//!
//! Round-trips the built-in sample messages through both transport paths
//! and reports pass/fail counts.

use anyhow::{Context, Result};
use clap::Args;
use dnaf_codec::FountainConfig;
use dnaf_testkit::{fixtures, FountainTestHarness};
use tracing::info;

/// Arguments for the `dnaf selftest` command.
#[derive(Args, Debug)]
pub struct SelftestArgs {
    /// Chunk size in bits for the sample sessions.
    #[arg(long, default_value_t = 4)]
    pub chunk_size: usize,

    /// Output JSON stats instead of a summary line.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Run the selftest command.
///
/// # Errors
///
/// Returns an error if any sample message fails to round-trip.
pub fn run(args: &SelftestArgs) -> Result<()> {
    let config = FountainConfig {
        chunk_size_bits: args.chunk_size,
        ..fixtures::sample_config()
    };
    info!(chunk_size_bits = config.chunk_size_bits, "running self-test");

    let mut harness = FountainTestHarness::new(config);
    let result = harness.run_all_samples();
    let stats = harness.stats();

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "total_runs": stats.total_runs,
                "successes": stats.successes,
                "failures": stats.failures,
                "total_duration_ms": stats.total_duration_ms,
            })
        );
    } else {
        println!(
            "self-test: {} runs, {} passed, {} failed",
            stats.total_runs, stats.successes, stats.failures
        );
    }

    result.context("self-test failed")?;
    Ok(())
}
