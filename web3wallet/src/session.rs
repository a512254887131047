//! Wallet session
//!
//! A session owns one recovery phrase, the seed stretched from it (computed
//! once), and an account registry per chain. Each registry sits behind its
//! own mutex so concurrent callers still get gap-free indices.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::info;
use zeroize::Zeroizing;

use crate::account::{Account, AccountRegistry};
use crate::config::EngineConfig;
use crate::crypto::keys::ChainKind;
use crate::crypto::mnemonic::{generate_mnemonic, parse_mnemonic, MnemonicStrength};
use crate::crypto::seed::{derive_seed, Seed};
use crate::error::{Error, Result};

pub struct Session {
    phrase: Zeroizing<String>,
    word_count: usize,
    seed: Seed,
    ethereum: Mutex<AccountRegistry>,
    solana: Mutex<AccountRegistry>,
}

impl Session {
    /// Start a session with a freshly generated phrase
    pub fn generate(strength: MnemonicStrength, passphrase: Option<&str>) -> Result<Self> {
        let phrase = Zeroizing::new(generate_mnemonic(strength)?);
        Self::from_phrase(&phrase, passphrase)
    }

    /// Start a session from an existing phrase
    pub fn from_phrase(phrase: &str, passphrase: Option<&str>) -> Result<Self> {
        let mnemonic = parse_mnemonic(phrase)?;
        let seed = derive_seed(&mnemonic, passphrase.unwrap_or(""));

        info!(words = mnemonic.word_count(), "wallet session started");

        Ok(Self {
            phrase: Zeroizing::new(mnemonic.to_string()),
            word_count: mnemonic.word_count(),
            seed,
            ethereum: Mutex::new(AccountRegistry::new(ChainKind::Ethereum)),
            solana: Mutex::new(AccountRegistry::new(ChainKind::Solana)),
        })
    }

    /// Start a session as described by `config`, importing `phrase` if given
    pub fn from_config(config: &EngineConfig, phrase: Option<&str>) -> Result<Self> {
        let passphrase = config.passphrase.as_deref();
        match phrase {
            Some(phrase) => Self::from_phrase(phrase, passphrase),
            None => Self::generate(config.strength()?, passphrase),
        }
    }

    /// The normalized recovery phrase
    pub fn mnemonic(&self) -> &str {
        &self.phrase
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// The cached master seed
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Derive and record the next account for `chain`
    pub fn generate_account(&self, chain: ChainKind) -> Result<Account> {
        self.registry(chain)?.next_account(&self.seed)
    }

    /// Skip the pending index of `chain` after a failed derivation
    pub fn skip_index(&self, chain: ChainKind, index: u32) -> Result<()> {
        self.registry(chain)?.skip_index(index)
    }

    /// Snapshot of the accounts derived so far, in derivation order
    pub fn accounts(&self, chain: ChainKind) -> Result<Vec<Account>> {
        Ok(self.registry(chain)?.accounts().to_vec())
    }

    pub fn next_index(&self, chain: ChainKind) -> Result<u32> {
        Ok(self.registry(chain)?.next_index())
    }

    fn registry(&self, chain: ChainKind) -> Result<MutexGuard<'_, AccountRegistry>> {
        let registry = match chain {
            ChainKind::Ethereum => &self.ethereum,
            ChainKind::Solana => &self.solana,
        };
        registry
            .lock()
            .map_err(|_| Error::Unknown(format!("{} registry lock poisoned", chain)))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("words", &self.word_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_from_phrase() {
        let session = Session::from_phrase(TEST_MNEMONIC, None).unwrap();
        assert_eq!(session.mnemonic(), TEST_MNEMONIC);
        assert_eq!(session.word_count(), 12);
        assert_eq!(hex::encode(&session.seed().as_bytes()[0..8]), "5eb00bbddcf06908");
    }

    #[test]
    fn test_debug_hides_phrase() {
        let session = Session::from_phrase(TEST_MNEMONIC, None).unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("words: 12"));
        assert!(!debug.contains("abandon"));
    }

    #[test]
    fn test_invalid_phrase() {
        assert!(matches!(
            Session::from_phrase("not a real phrase", None),
            Err(Error::Mnemonic(_))
        ));
    }

    #[test]
    fn test_generate() {
        let session = Session::generate(MnemonicStrength::Words24, None).unwrap();
        assert_eq!(session.word_count(), 24);
        assert_eq!(session.mnemonic().split_whitespace().count(), 24);
    }

    #[test]
    fn test_chains_are_independent() {
        let session = Session::from_phrase(TEST_MNEMONIC, None).unwrap();
        session.generate_account(ChainKind::Ethereum).unwrap();
        session.generate_account(ChainKind::Ethereum).unwrap();
        let sol = session.generate_account(ChainKind::Solana).unwrap();

        assert_eq!(sol.index(), 0);
        assert_eq!(session.next_index(ChainKind::Ethereum).unwrap(), 2);
        assert_eq!(session.next_index(ChainKind::Solana).unwrap(), 1);
        assert_eq!(session.accounts(ChainKind::Solana).unwrap(), vec![sol]);
    }

    #[test]
    fn test_from_config_uses_passphrase() {
        let config = EngineConfig {
            passphrase: Some("TREZOR".to_string()),
            ..EngineConfig::default()
        };
        let salted = Session::from_config(&config, Some(TEST_MNEMONIC)).unwrap();
        let plain = Session::from_phrase(TEST_MNEMONIC, None).unwrap();
        assert_ne!(salted.seed(), plain.seed());
    }

    #[test]
    fn test_concurrent_generation_is_gap_free() {
        let session = Arc::new(Session::from_phrase(TEST_MNEMONIC, None).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    (0..3)
                        .map(|_| session.generate_account(ChainKind::Solana).unwrap().index())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut indices: Vec<u32> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        indices.sort_unstable();

        assert_eq!(indices, (0..12).collect::<Vec<u32>>());
        let stored: Vec<u32> = session
            .accounts(ChainKind::Solana)
            .unwrap()
            .iter()
            .map(Account::index)
            .collect();
        assert_eq!(stored, (0..12).collect::<Vec<u32>>());
    }
}
