//! Engine configuration
//!
//! Settings are read from the environment with defaults, and the CLI layers
//! its own flags on top.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::mnemonic::MnemonicStrength;
use crate::error::{Error, Result};

pub const ENV_MNEMONIC_WORDS: &str = "WEB3WALLET_MNEMONIC_WORDS";
pub const ENV_PASSPHRASE: &str = "WEB3WALLET_PASSPHRASE";
pub const ENV_DISPLAY_ORDER: &str = "WEB3WALLET_DISPLAY_ORDER";

/// Order in which a display collaborator should render a registry.
///
/// Storage is always insertion order; this only picks a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayOrder {
    #[default]
    NewestFirst,
    Insertion,
}

impl FromStr for DisplayOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest-first" | "newest" => Ok(Self::NewestFirst),
            "insertion" | "oldest-first" => Ok(Self::Insertion),
            other => Err(Error::Config(format!("Unknown display order: {}", other))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Word count for freshly generated phrases
    pub mnemonic_words: usize,
    /// Optional BIP39 passphrase ("25th word")
    #[serde(skip_serializing)]
    pub passphrase: Option<String>,
    /// How accounts are listed to the user
    pub display_order: DisplayOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mnemonic_words: 12,
            passphrase: None,
            display_order: DisplayOrder::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(words) = lookup(ENV_MNEMONIC_WORDS) {
            config.mnemonic_words = words.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a number, got {:?}",
                    ENV_MNEMONIC_WORDS, words
                ))
            })?;
        }

        if let Some(passphrase) = lookup(ENV_PASSPHRASE) {
            config.passphrase = Some(passphrase);
        }

        if let Some(order) = lookup(ENV_DISPLAY_ORDER) {
            config.display_order = order.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the settings describe a usable engine
    pub fn validate(&self) -> Result<()> {
        self.strength().map(|_| ())
    }

    /// Mnemonic strength implied by `mnemonic_words`
    pub fn strength(&self) -> Result<MnemonicStrength> {
        MnemonicStrength::from_word_count(self.mnemonic_words)
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Passphrase to stretch the phrase with, empty when unset
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or("")
    }
}
