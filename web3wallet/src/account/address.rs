//! Address validation and decoding

use crate::crypto::keys::ethereum::{to_checksum_address, ADDRESS_LEN};
use crate::crypto::keys::solana::PUBLIC_KEY_LEN;
use crate::crypto::keys::ChainKind;
use crate::error::{Error, Result};

/// Decode a chain-native address back to its raw bytes.
///
/// Ethereum addresses yield 20 bytes, Solana public keys 32 bytes.
pub fn decode_address(address: &str, chain: ChainKind) -> Result<Vec<u8>> {
    match chain {
        ChainKind::Ethereum => {
            let digits = address
                .strip_prefix("0x")
                .ok_or_else(|| Error::InvalidInput(format!("Missing 0x prefix: {}", address)))?;
            let bytes = hex::decode(digits)
                .map_err(|e| Error::InvalidInput(format!("Invalid hex address: {}", e)))?;
            if bytes.len() != ADDRESS_LEN {
                return Err(Error::InvalidInput(format!(
                    "Ethereum address must be {} bytes, got {}",
                    ADDRESS_LEN,
                    bytes.len()
                )));
            }
            Ok(bytes)
        }
        ChainKind::Solana => {
            let bytes = bs58::decode(address)
                .into_vec()
                .map_err(|e| Error::InvalidInput(format!("Invalid base58 address: {}", e)))?;
            if bytes.len() != PUBLIC_KEY_LEN {
                return Err(Error::InvalidInput(format!(
                    "Solana address must be {} bytes, got {}",
                    PUBLIC_KEY_LEN,
                    bytes.len()
                )));
            }
            Ok(bytes)
        }
    }
}

/// Validate an address for a specific chain.
///
/// Mixed-case Ethereum addresses must carry a correct EIP-55 checksum;
/// all-lowercase or all-uppercase ones are accepted as unchecksummed.
pub fn validate_address(address: &str, chain: ChainKind) -> bool {
    let bytes = match decode_address(address, chain) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    match chain {
        ChainKind::Ethereum => {
            let digits = &address[2..];
            let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
            let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
            if has_lower && has_upper {
                to_checksum_address(&bytes) == address
            } else {
                true
            }
        }
        ChainKind::Solana => true,
    }
}
