//! Binary to nucleotide mapping.
//!
//! The external alphabet is the four nucleotides. The bijection is fixed once
//! for all interoperating builds: bits are grouped MSB-first into 2-bit
//! values, `00 -> A`, `01 -> C`, `10 -> G`, `11 -> T`. Case-sensitive.

use crate::bits::BitString;
use crate::error::SymbolError;

/// The output alphabet, indexed by 2-bit value.
pub const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

/// Map a bit string to nucleotides, 2 bits per symbol.
///
/// # Errors
///
/// Returns `SymbolError::OddBitLength` unless the bit length is a multiple
/// of 2. No padding happens here; droplet payloads are even-sized by session
/// validation.
pub fn to_symbols(bits: &BitString) -> Result<String, SymbolError> {
    if bits.len() % 2 != 0 {
        return Err(SymbolError::OddBitLength { bits: bits.len() });
    }
    Ok(bits
        .pair_values()
        .map(|v| ALPHABET[v as usize])
        .collect())
}

/// Reverse the nucleotide mapping.
///
/// # Errors
///
/// Returns `SymbolError::InvalidSymbol` on the first character outside the
/// alphabet, reporting its position.
pub fn to_bits(symbols: &str) -> Result<BitString, SymbolError> {
    let mut bits = BitString::new();
    for (position, symbol) in symbols.chars().enumerate() {
        let value = match symbol {
            'A' => 0,
            'C' => 1,
            'G' => 2,
            'T' => 3,
            _ => return Err(SymbolError::InvalidSymbol { symbol, position }),
        };
        bits.push_pair(value);
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fixed_mapping() {
        let bits = BitString::from_bytes(&[0b0001_1011]);
        assert_eq!(to_symbols(&bits).unwrap(), "ACGT");
    }

    #[test]
    fn odd_length_rejected() {
        let mut bits = BitString::new();
        bits.push(true);
        assert!(matches!(
            to_symbols(&bits),
            Err(SymbolError::OddBitLength { bits: 1 })
        ));
    }

    #[test]
    fn invalid_symbol_rejected_with_position() {
        let err = to_bits("ACGU").unwrap_err();
        assert_eq!(
            err,
            SymbolError::InvalidSymbol {
                symbol: 'U',
                position: 3,
            }
        );
        // Lowercase is not in the alphabet either.
        assert!(to_bits("acgt").is_err());
    }

    #[test]
    fn empty_round_trip() {
        assert_eq!(to_symbols(&BitString::new()).unwrap(), "");
        assert_eq!(to_bits("").unwrap(), BitString::new());
    }

    proptest! {
        #[test]
        fn bits_symbols_bits(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let bits = BitString::from_bytes(&bytes);
            let symbols = to_symbols(&bits).unwrap();
            prop_assert_eq!(to_bits(&symbols).unwrap(), bits);
        }

        #[test]
        fn symbols_bits_symbols(symbols in "[ACGT]{0,128}") {
            let bits = to_bits(&symbols).unwrap();
            prop_assert_eq!(to_symbols(&bits).unwrap(), symbols);
        }
    }
}
