//! `dnaf decode` command implementation.
//!
//! # Usage
//!
//! ```text
//! # Droplet lines from a file
//! dnaf decode --length 4 --input droplets.tsv
//!
//! # Framed string from stdin
//! dnaf encode --message 0ff0aa55 --framed | dnaf decode --length 4 --framed
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dnaf_codec::{decode, parse_stream, EncodedDroplet};
use tracing::info;

use crate::SessionArgs;

/// Arguments for the `dnaf decode` command.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Original message length in bytes.
    #[arg(long, short = 'l')]
    pub length: usize,

    #[command(flatten)]
    session: SessionArgs,

    /// Input file with droplets; reads stdin when omitted.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Treat the input as one framed nucleotide string.
    #[arg(long, default_value_t = false)]
    pub framed: bool,
}

/// Run the decode command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if decoding
/// fails (including a stall with too few droplets).
pub fn run(args: &DecodeArgs) -> Result<()> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let config = args.session.to_config();
    let chunk_count = config.chunk_count(args.length);

    let droplets = if args.framed {
        parse_stream(text.trim(), &config)?
    } else {
        parse_droplet_lines(&text)?
    };
    info!(
        droplet_count = droplets.len(),
        chunk_count, "droplets parsed"
    );

    let message = decode(&droplets, chunk_count, args.length, &config)?;
    println!("{}", hex::encode(message));
    Ok(())
}

/// Parse `<seed>\t<symbols>` droplet lines; blank lines are skipped.
fn parse_droplet_lines(text: &str) -> Result<Vec<EncodedDroplet>> {
    let mut droplets = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (seed, symbols) = line
            .split_once(char::is_whitespace)
            .with_context(|| format!("line {}: expected `<seed> <symbols>`", number + 1))?;
        droplets.push(EncodedDroplet {
            seed: seed
                .parse()
                .with_context(|| format!("line {}: invalid seed {seed:?}", number + 1))?,
            symbols: symbols.trim().to_string(),
        });
    }
    Ok(droplets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_droplet_lines() {
        let text = "0\tGGCC\n\n3\tTTAA\n";
        let droplets = parse_droplet_lines(text).unwrap();
        assert_eq!(droplets.len(), 2);
        assert_eq!(droplets[0].seed, 0);
        assert_eq!(droplets[0].symbols, "GGCC");
        assert_eq!(droplets[1].seed, 3);
        assert_eq!(droplets[1].symbols, "TTAA");
    }

    #[test]
    fn rejects_malformed_line() {
        assert!(parse_droplet_lines("GGCC").is_err());
        assert!(parse_droplet_lines("x\tGGCC").is_err());
    }
}
