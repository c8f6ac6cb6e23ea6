//! `dnaf encode` command implementation.
//!
//! # Usage
//!
//! ```text
//! # Droplet lines: <seed>\t<symbols>
//! dnaf encode --message 0ff0aa55
//!
//! # One framed nucleotide string
//! dnaf encode --message 0ff0aa55 --framed
//!
//! # JSON output for tooling
//! dnaf encode --message 0ff0aa55 --json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use dnaf_codec::{encode, frame_stream};
use tracing::info;

use crate::SessionArgs;

/// Arguments for the `dnaf encode` command.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message bytes, hex-encoded.
    #[arg(long, short = 'm')]
    pub message: String,

    #[command(flatten)]
    session: SessionArgs,

    /// Number of droplets to emit (defaults to the configured redundancy).
    #[arg(long)]
    pub droplets: Option<usize>,

    /// Emit one framed nucleotide string instead of droplet lines.
    #[arg(long, default_value_t = false)]
    pub framed: bool,

    /// Output JSON instead of plain text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Run the encode command.
///
/// # Errors
///
/// Returns an error if the message is not valid hex or the session
/// configuration is rejected by the codec.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let message = hex::decode(&args.message).context("message must be hex-encoded")?;
    let config = args.session.to_config();
    let chunk_count = config.chunk_count(message.len());
    let droplet_count = args
        .droplets
        .unwrap_or_else(|| config.droplet_count(chunk_count));

    let droplets = encode(&message, &config, droplet_count)?;
    info!(
        message_len = message.len(),
        chunk_count, droplet_count, "message encoded"
    );

    if args.framed {
        let stream = frame_stream(&droplets, &config)?;
        if args.json {
            println!(
                "{}",
                serde_json::json!({
                    "stream": stream,
                    "chunk_count": chunk_count,
                    "message_len": message.len(),
                })
            );
        } else {
            println!("{stream}");
        }
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&droplets)?);
    } else {
        for droplet in &droplets {
            println!("{}\t{}", droplet.seed, droplet.symbols);
        }
    }
    Ok(())
}
