//! Key derivation and management
//!
//! This module provides the path builder and one deriver per supported
//! chain, sharing only the HMAC-SHA512 child-key primitive.

pub mod ethereum;
pub mod solana;
pub mod path;
mod derivation;

pub use derivation::*;
pub use path::{build_path, ChildIndex, DerivationPath, HARDENED_OFFSET, MAX_ACCOUNT_INDEX};
