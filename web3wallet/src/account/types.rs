//! Derived account type

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::keys::ChainKind;

/// A derived account with its keys in the chain's native encoding.
///
/// For Ethereum `public_key` is the checksummed `0x` address and
/// `private_key` the `0x`-prefixed hex scalar; for Solana both are base58.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    index: u32,
    chain: ChainKind,
    public_key: String,
    private_key: String,
    path: String,
}

impl Account {
    pub(crate) fn new(
        index: u32,
        chain: ChainKind,
        public_key: String,
        private_key: String,
        path: String,
    ) -> Self {
        Self {
            index,
            chain,
            public_key,
            private_key,
            path,
        }
    }

    /// The account index within its chain
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn chain(&self) -> ChainKind {
        self.chain
    }

    /// Public key (Ethereum: address)
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// The derivation path, e.g. `m/44'/60'/0'/0/0`
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("index", &self.index)
            .field("chain", &self.chain)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("path", &self.path)
            .finish()
    }
}
