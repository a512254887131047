//! Ethereum key derivation (BIP32 over secp256k1)

use secp256k1::{All, PublicKey as Secp256k1PublicKey, Scalar, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::crypto::keys::derivation::{
    derivation_error, hmac_sha512, ChainDeriver, ChainKind, EncodedKeys, ExtendedKey, KeyPair,
    PrivateKey, PublicKey,
};
use crate::crypto::keys::path::{ChildIndex, DerivationPath};
use crate::crypto::seed::Seed;
use crate::error::{Error, Result};

/// BIP32 master key domain
const BITCOIN_SEED: &[u8] = b"Bitcoin seed";

/// Length of an Ethereum address in bytes
pub const ADDRESS_LEN: usize = 20;

/// BIP32 deriver for Ethereum accounts
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Deriver;

impl ChainDeriver for Secp256k1Deriver {
    fn chain(&self) -> ChainKind {
        ChainKind::Ethereum
    }

    fn derive_key_pair(&self, seed: &Seed, path: &DerivationPath) -> Result<KeyPair> {
        let secp = Secp256k1::new();

        let mut node = ExtendedKey::master(BITCOIN_SEED, seed)?;
        master_secret_key(&node)?;

        for segment in path.segments() {
            node = derive_child_key(&secp, &node, *segment)
                .map_err(|reason| derivation_error(path, reason))?;
        }

        let secret_key = SecretKey::from_slice(&node.secret[..])
            .map_err(|e| derivation_error(path, format!("Invalid secret key: {}", e)))?;
        let public_key = Secp256k1PublicKey::from_secret_key(&secp, &secret_key);

        let private_key = PrivateKey::new(secret_key.secret_bytes().to_vec(), ChainKind::Ethereum);
        let public_key =
            PublicKey::new(public_key.serialize_uncompressed().to_vec(), ChainKind::Ethereum);

        KeyPair::new(private_key, public_key)
    }

    fn encode(&self, key_pair: &KeyPair) -> Result<EncodedKeys> {
        if key_pair.chain() != ChainKind::Ethereum {
            return Err(Error::InvalidInput("Not an Ethereum key pair".to_string()));
        }

        Ok(EncodedKeys {
            public_key: public_key_to_address(key_pair.public_key())?,
            private_key: format!("0x{}", hex::encode(key_pair.private_key().as_bytes())),
        })
    }
}

/// The master secret must be a valid scalar; no account index can fix a bad seed
fn master_secret_key(master: &ExtendedKey) -> Result<SecretKey> {
    SecretKey::from_slice(&master.secret[..])
        .map_err(|e| Error::InvalidInput(format!("Seed yields an invalid master key: {}", e)))
}

/// CKDpriv: derive a child key from a parent key.
///
/// Failures carry a reason only; the caller attaches the account index.
fn derive_child_key(
    secp: &Secp256k1<All>,
    parent: &ExtendedKey,
    child: ChildIndex,
) -> std::result::Result<ExtendedKey, String> {
    let parent_secret_key = SecretKey::from_slice(&parent.secret[..])
        .map_err(|e| format!("Invalid parent key: {}", e))?;

    let index = child.to_u32().to_be_bytes();
    let output = if child.is_hardened() {
        // Hardened derivation never feeds the public key
        hmac_sha512(&parent.chain_code[..], &[&[0u8][..], &parent.secret[..], &index[..]])
    } else {
        let parent_public_key = Secp256k1PublicKey::from_secret_key(secp, &parent_secret_key);
        hmac_sha512(&parent.chain_code[..], &[&parent_public_key.serialize()[..], &index[..]])
    };
    let output = output.map_err(|e| e.to_string())?;

    let tweaked = ExtendedKey::from_hmac_output(output);

    // IL must be below the curve order
    let il = Scalar::from_be_bytes(*tweaked.secret)
        .map_err(|_| format!("Invalid child key at segment {}: IL exceeds curve order", child))?;

    // k_child = IL + k_par (mod n), rejected when zero
    let child_secret_key = parent_secret_key
        .add_tweak(&il)
        .map_err(|e| format!("Invalid child key at segment {}: {}", child, e))?;

    Ok(ExtendedKey {
        secret: Zeroizing::new(child_secret_key.secret_bytes()),
        chain_code: tweaked.chain_code,
    })
}

/// Get the EIP-55 checksummed Ethereum address from a public key
pub fn public_key_to_address(public_key: &PublicKey) -> Result<String> {
    if public_key.chain() != ChainKind::Ethereum {
        return Err(Error::InvalidInput("Not an Ethereum public key".to_string()));
    }

    let public_key = public_key.as_bytes();

    // The public key should be in uncompressed format (65 bytes)
    if public_key.len() != 65 {
        return Err(Error::InvalidInput("Invalid Ethereum public key length".to_string()));
    }

    // Skip the first byte (0x04) and hash the rest
    let key_hash = keccak256(&public_key[1..]);

    Ok(to_checksum_address(&key_hash[32 - ADDRESS_LEN..]))
}

/// Format 20 address bytes with EIP-55 mixed-case checksum
pub fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Calculate the Keccak-256 hash of data
fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
