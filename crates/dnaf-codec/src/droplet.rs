//! Droplet records.

use serde::{Deserialize, Serialize};

use crate::bits::BitString;
use crate::error::{DecodeError, EncodeError};
use crate::symbol;

/// One encoded unit: a seed and the XOR of the seed-selected chunks.
///
/// The seed fully determines the droplet's degree and source chunk set;
/// droplets are produced in increasing seed order `0, 1, 2, ...` and each
/// seed maps to exactly one droplet for a given chunk set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droplet {
    /// Seed the selection is re-derived from.
    pub seed: u64,
    /// XOR of the selected chunks' bit strings.
    pub payload: BitString,
}

impl Droplet {
    /// Map the payload to its external nucleotide form.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::OddBitLength` if the payload has odd bit length
    /// (cannot happen for payloads produced by a validated session).
    pub fn to_symbols(&self) -> Result<EncodedDroplet, EncodeError> {
        Ok(EncodedDroplet {
            seed: self.seed,
            symbols: symbol::to_symbols(&self.payload)?,
        })
    }
}

/// A droplet in external form: seed plus nucleotide string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedDroplet {
    /// Seed the selection is re-derived from.
    pub seed: u64,
    /// Payload over `{A, C, G, T}`, two bits per symbol.
    pub symbols: String,
}

impl EncodedDroplet {
    /// Reverse the symbol mapping back to a droplet record.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Symbol` on any character outside the alphabet.
    pub fn to_droplet(&self) -> Result<Droplet, DecodeError> {
        Ok(Droplet {
            seed: self.seed,
            payload: symbol::to_bits(&self.symbols)?,
        })
    }
}
