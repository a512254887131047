//! Solana key derivation (SLIP-0010 over ed25519)
//!
//! ed25519 has no public-parent derivation, so every segment of the path
//! must be hardened.

use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::crypto::keys::derivation::{
    hmac_sha512, ChainDeriver, ChainKind, EncodedKeys, ExtendedKey, KeyPair, PrivateKey, PublicKey,
};
use crate::crypto::keys::path::{ChildIndex, DerivationPath};
use crate::crypto::seed::Seed;
use crate::error::{Error, Result};

/// SLIP-0010 master key domain for ed25519
const ED25519_SEED: &[u8] = b"ed25519 seed";

/// Length of an ed25519 public key in bytes
pub const PUBLIC_KEY_LEN: usize = 32;

/// SLIP-0010 deriver for Solana accounts
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Deriver;

impl ChainDeriver for Ed25519Deriver {
    fn chain(&self) -> ChainKind {
        ChainKind::Solana
    }

    fn derive_key_pair(&self, seed: &Seed, path: &DerivationPath) -> Result<KeyPair> {
        let mut node = ExtendedKey::master(ED25519_SEED, seed)?;

        for segment in path.segments() {
            node = derive_child_key(&node, *segment)?;
        }

        let signing_key = SigningKey::from_bytes(&node.secret);
        let verifying_key = VerifyingKey::from(&signing_key);

        // The private key exposed to callers is the 32-byte seed half
        let private_key = PrivateKey::new(signing_key.to_bytes().to_vec(), ChainKind::Solana);
        let public_key = PublicKey::new(verifying_key.to_bytes().to_vec(), ChainKind::Solana);

        KeyPair::new(private_key, public_key)
    }

    fn encode(&self, key_pair: &KeyPair) -> Result<EncodedKeys> {
        if key_pair.chain() != ChainKind::Solana {
            return Err(Error::InvalidInput("Not a Solana key pair".to_string()));
        }

        Ok(EncodedKeys {
            public_key: public_key_to_address(key_pair.public_key())?,
            private_key: bs58::encode(key_pair.private_key().as_bytes()).into_string(),
        })
    }
}

/// Derive a hardened child key from a parent key
fn derive_child_key(parent: &ExtendedKey, child: ChildIndex) -> Result<ExtendedKey> {
    if !child.is_hardened() {
        return Err(Error::InvalidPath(format!(
            "ed25519 supports only hardened derivation, got segment {}",
            child
        )));
    }

    let index = child.to_u32().to_be_bytes();
    let output = hmac_sha512(
        &parent.chain_code[..],
        &[&[0u8][..], &parent.secret[..], &index[..]],
    )?;

    Ok(ExtendedKey::from_hmac_output(output))
}

/// Get the Solana address (base58 public key)
pub fn public_key_to_address(public_key: &PublicKey) -> Result<String> {
    if public_key.chain() != ChainKind::Solana {
        return Err(Error::InvalidInput("Not a Solana public key".to_string()));
    }

    let public_key = public_key.as_bytes();

    if public_key.len() != PUBLIC_KEY_LEN {
        return Err(Error::InvalidInput("Invalid Solana public key length".to_string()));
    }

    Ok(bs58::encode(public_key).into_string())
}
