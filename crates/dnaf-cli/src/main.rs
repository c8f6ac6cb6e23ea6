//! DNA fountain developer CLI entrypoint.
//!
//! This CLI exercises the fountain codec end to end:
//! - `dnaf encode` - encode a hex message into nucleotide droplets
//! - `dnaf decode` - decode droplets back into the original message
//! - `dnaf selftest` - round-trip the built-in sample messages

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod selftest;

use clap::{Args, Parser, Subcommand};
use dnaf_codec::FountainConfig;

/// DNA fountain developer CLI.
#[derive(Parser)]
#[command(name = "dnaf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logging level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a hex message into nucleotide droplets.
    ///
    /// Emits one `<seed>\t<symbols>` line per droplet, or one framed
    /// nucleotide string with `--framed`.
    Encode(encode::EncodeArgs),

    /// Decode nucleotide droplets back into the original message.
    ///
    /// Reads droplet lines (or a framed string with `--framed`) from stdin
    /// or a file and prints the recovered message as hex.
    Decode(decode::DecodeArgs),

    /// Run the built-in self-test suite.
    ///
    /// Round-trips the reference sample messages through both the
    /// droplet-record and framed-string paths.
    Selftest(selftest::SelftestArgs),
}

/// Session parameters shared by encode and decode.
///
/// Both sides of a session must agree on these; they are out-of-band
/// metadata, not part of the droplet stream.
#[derive(Args, Debug)]
struct SessionArgs {
    /// Chunk size in bits (positive and even).
    #[arg(long, default_value_t = 8)]
    chunk_size: usize,

    /// Extra droplets in basis points of the chunk count.
    #[arg(long, default_value_t = 20_000)]
    redundancy_bps: u32,

    /// Seed field width in symbols for framed streams.
    #[arg(long, default_value_t = 16)]
    seed_symbols: usize,

    /// Reject droplets that contradict already-resolved chunks.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl SessionArgs {
    fn to_config(&self) -> FountainConfig {
        FountainConfig {
            chunk_size_bits: self.chunk_size,
            redundancy_bps: self.redundancy_bps,
            seed_symbols: self.seed_symbols,
            strict_integrity: self.strict,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for droplet/message output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_level.parse()?),
        )
        .init();

    match cli.command {
        Commands::Encode(args) => encode::run(&args),
        Commands::Decode(args) => decode::run(&args),
        Commands::Selftest(args) => selftest::run(&args),
    }
}
