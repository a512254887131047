//! BIP39 seed derivation
//!
//! The phrase and passphrase are NFKD-normalized and stretched with
//! PBKDF2-HMAC-SHA512 (2048 rounds, salt `"mnemonic" || passphrase`) into a
//! 64-byte master seed.

use std::fmt;

use bip39::Mnemonic;
use zeroize::Zeroize;

use crate::crypto::mnemonic::parse_mnemonic;
use crate::error::{Error, Result};

/// Length of a BIP39 seed in bytes
pub const SEED_LEN: usize = 64;

/// A 64-byte master seed, wiped from memory on drop
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_LEN]);

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Seed {
    /// Wrap raw seed bytes
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a seed slice, which must be exactly 64 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SEED_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidInput(format!("Seed must be {} bytes, got {}", SEED_LEN, bytes.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw seed bytes
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Hex encoding of the seed
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// Stretch a parsed mnemonic and passphrase into a seed
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    Seed(mnemonic.to_seed(passphrase))
}

/// Generate a seed from a mnemonic phrase and optional passphrase
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<Seed> {
    let mnemonic = parse_mnemonic(phrase)?;
    Ok(derive_seed(&mnemonic, passphrase.unwrap_or("")))
}

/// Raw-bytes form of [`mnemonic_to_seed`] for display collaborators
pub fn derive_seed_from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Vec<u8>> {
    mnemonic_to_seed(phrase, passphrase).map(|seed| seed.as_bytes().to_vec())
}
