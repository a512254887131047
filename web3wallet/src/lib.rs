//! web3wallet - Deterministic multi-chain key derivation
//!
//! This library turns a single BIP39 recovery phrase into per-account key
//! pairs for Ethereum (secp256k1, BIP32) and Solana (ed25519, SLIP-0010),
//! rendered in each chain's native textual encoding. Key material only ever
//! lives in process memory.

pub mod error;
pub mod config;
pub mod crypto;
pub mod account;
pub mod session;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use config::{DisplayOrder, EngineConfig};
pub use crypto::keys::{build_path, derive, ChainKind, DerivationPath};
pub use crypto::mnemonic::{generate_mnemonic, MnemonicStrength};
pub use crypto::seed::{derive_seed_from_mnemonic, Seed};
pub use account::{Account, AccountRegistry};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
