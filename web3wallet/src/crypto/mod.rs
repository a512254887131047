//! Cryptographic primitives and operations
//!
//! This module provides functionality for mnemonic generation, seed
//! stretching, and per-chain key derivation.

pub mod mnemonic;
pub mod seed;
pub mod keys;

pub use mnemonic::*;
pub use seed::*;
pub use keys::*;
