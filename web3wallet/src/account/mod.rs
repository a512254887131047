//! Account management functionality
//!
//! This module provides the derived account type, the per-chain append-only
//! account registry, and validation of chain-native address encodings.

mod types;
mod registry;
pub mod address;

pub use types::*;
pub use registry::*;
