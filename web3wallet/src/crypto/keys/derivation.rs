//! Common key derivation functionality
//!
//! Both chains walk a seed down a path with HMAC-SHA512 chaining; they differ
//! in the curve, the hardening rules and the output encoding, so each gets
//! its own [`ChainDeriver`].

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::account::Account;
use crate::crypto::keys::ethereum::Secp256k1Deriver;
use crate::crypto::keys::path::DerivationPath;
use crate::crypto::keys::solana::Ed25519Deriver;
use crate::crypto::seed::Seed;
use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Supported chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// Ethereum and EVM compatible chains (secp256k1)
    Ethereum,
    /// Solana (ed25519)
    Solana,
}

impl ChainKind {
    pub const ALL: [ChainKind; 2] = [ChainKind::Ethereum, ChainKind::Solana];

    /// SLIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        match self {
            Self::Ethereum => 60,
            Self::Solana => 501,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Solana => "solana",
        }
    }

    /// The deriver implementing this chain's algorithm
    pub fn deriver(&self) -> &'static dyn ChainDeriver {
        match self {
            Self::Ethereum => &Secp256k1Deriver,
            Self::Solana => &Ed25519Deriver,
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" | "eth" => Ok(Self::Ethereum),
            "solana" | "sol" => Ok(Self::Solana),
            other => Err(Error::InvalidInput(format!("Unsupported chain: {}", other))),
        }
    }
}

/// A private key for a specific blockchain
#[derive(Clone)]
pub struct PrivateKey {
    /// The raw private key bytes
    bytes: Zeroizing<Vec<u8>>,
    /// The chain the key belongs to
    chain: ChainKind,
}

impl PrivateKey {
    pub fn new(bytes: Vec<u8>, chain: ChainKind) -> Self {
        Self { bytes: Zeroizing::new(bytes), chain }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn chain(&self) -> ChainKind {
        self.chain
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("chain", &self.chain)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A public key for a specific blockchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// The raw public key bytes
    bytes: Vec<u8>,
    chain: ChainKind,
}

impl PublicKey {
    pub fn new(bytes: Vec<u8>, chain: ChainKind) -> Self {
        Self { bytes, chain }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn chain(&self) -> ChainKind {
        self.chain
    }
}

/// A key pair for a specific blockchain
#[derive(Debug, Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Create a new key pair
    pub fn new(private_key: PrivateKey, public_key: PublicKey) -> Result<Self> {
        if private_key.chain() != public_key.chain() {
            return Err(Error::InvalidInput("Key chain mismatch".to_string()));
        }
        Ok(Self { private_key, public_key })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn chain(&self) -> ChainKind {
        self.private_key.chain()
    }
}

/// Chain-native textual form of a key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKeys {
    pub public_key: String,
    pub private_key: String,
}

/// A secret scalar plus chain code at some node of the derivation tree
pub struct ExtendedKey {
    pub secret: Zeroizing<[u8; 32]>,
    pub chain_code: Zeroizing<[u8; 32]>,
}

impl ExtendedKey {
    /// Split an HMAC-SHA512 output into `(IL, IR)`
    pub fn from_hmac_output(mut output: [u8; 64]) -> Self {
        let mut secret = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);
        output.zeroize();
        Self { secret, chain_code }
    }

    /// Master node for a curve, keyed on its domain string
    pub fn master(curve_key: &[u8], seed: &Seed) -> Result<Self> {
        Ok(Self::from_hmac_output(hmac_sha512(curve_key, &[seed.as_bytes().as_slice()])?))
    }
}

/// HMAC-SHA512 over the concatenation of `parts`
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|_| Error::Unknown("HMAC error".to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut output = [0u8; 64];
    output.copy_from_slice(&mac.finalize().into_bytes());
    Ok(output)
}

/// A chain-specific derivation algorithm
pub trait ChainDeriver: Send + Sync {
    fn chain(&self) -> ChainKind;

    /// Walk `seed` down `path` to a key pair
    fn derive_key_pair(&self, seed: &Seed, path: &DerivationPath) -> Result<KeyPair>;

    /// Render a key pair in the chain's native encoding
    fn encode(&self, key_pair: &KeyPair) -> Result<EncodedKeys>;
}

/// Derive a raw key pair from a seed for a specific chain
pub fn derive_key_pair(seed: &Seed, chain: ChainKind, path: &DerivationPath) -> Result<KeyPair> {
    chain.deriver().derive_key_pair(seed, path)
}

/// Derive the account at `path` for `chain`
pub fn derive(seed: &Seed, path: &DerivationPath, chain: ChainKind) -> Result<Account> {
    let index = path
        .account_index()
        .ok_or_else(|| Error::InvalidPath(format!("Path has no account segment: {}", path)))?;

    let deriver = chain.deriver();
    let key_pair = deriver.derive_key_pair(seed, path)?;
    let encoded = deriver.encode(&key_pair)?;

    tracing::debug!(%chain, %path, "derived account keys");

    Ok(Account::new(index, chain, encoded.public_key, encoded.private_key, path.to_string()))
}

/// Attach the account index to a failed child computation
pub(crate) fn derivation_error(path: &DerivationPath, reason: impl Into<String>) -> Error {
    Error::Derivation {
        index: path.account_index().unwrap_or(0),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_parse() {
        assert_eq!("ethereum".parse::<ChainKind>().unwrap(), ChainKind::Ethereum);
        assert_eq!("ETH".parse::<ChainKind>().unwrap(), ChainKind::Ethereum);
        assert_eq!(" Solana ".parse::<ChainKind>().unwrap(), ChainKind::Solana);
        assert!("bitcoin".parse::<ChainKind>().is_err());
    }

    #[test]
    fn test_chain_serde() {
        assert_eq!(serde_json::to_string(&ChainKind::Solana).unwrap(), "\"solana\"");
        let chain: ChainKind = serde_json::from_str("\"ethereum\"").unwrap();
        assert_eq!(chain, ChainKind::Ethereum);
    }

    #[test]
    fn test_deriver_matches_chain() {
        for chain in ChainKind::ALL {
            assert_eq!(chain.deriver().chain(), chain);
        }
    }

    #[test]
    fn test_hmac_parts_concatenate() {
        let joined = hmac_sha512(b"key", &[b"hello world"]).unwrap();
        let split = hmac_sha512(b"key", &[b"hello", b" ", b"world"]).unwrap();
        assert_eq!(joined, split);
    }

    #[test]
    fn test_key_pair_chain_mismatch() {
        let private_key = PrivateKey::new(vec![1; 32], ChainKind::Ethereum);
        let public_key = PublicKey::new(vec![2; 32], ChainKind::Solana);
        assert!(KeyPair::new(private_key, public_key).is_err());
    }

    #[test]
    fn test_private_key_debug_redacts() {
        let private_key = PrivateKey::new(vec![0xab; 32], ChainKind::Solana);
        assert!(!format!("{:?}", private_key).contains("171"));
    }

    #[test]
    fn test_derive_requires_account_segment() {
        let seed = Seed::from_bytes([1u8; 64]);
        let path: DerivationPath = "m/44'/60'".parse().unwrap();
        assert!(matches!(derive(&seed, &path, ChainKind::Ethereum), Err(Error::InvalidPath(_))));
    }
}
