//! Mnemonic phrase generation and handling

use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    #[default]
    Words12,
    /// 15 words (160 bits)
    Words15,
    /// 18 words (192 bits)
    Words18,
    /// 21 words (224 bits)
    Words21,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Map a phrase length to its strength
    pub fn from_word_count(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            other => Err(Error::InvalidInput(format!(
                "Unsupported mnemonic length: {} (expected 12, 15, 18, 21 or 24 words)",
                other
            ))),
        }
    }

    /// Number of words in a phrase of this strength
    pub fn word_count(&self) -> usize {
        // 3 words per 32 bits of entropy
        self.entropy_bytes() * 3 / 4
    }

    /// Get entropy length in bytes
    pub fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16,
            Self::Words15 => 20,
            Self::Words18 => 24,
            Self::Words21 => 28,
            Self::Words24 => 32,
        }
    }
}

/// Generate a new random mnemonic phrase with the specified strength
pub fn generate_mnemonic(strength: MnemonicStrength) -> Result<String> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| Error::EntropySource(e.to_string()))?;

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| Error::Mnemonic(e.to_string()))?;

    tracing::debug!(words = strength.word_count(), "generated mnemonic");
    Ok(mnemonic.to_string())
}

/// Parse and normalize a mnemonic phrase, checking words and checksum
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    Mnemonic::parse(phrase).map_err(|e| Error::Mnemonic(e.to_string()))
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> Result<bool> {
    parse_mnemonic(phrase).map(|_| true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        assert!(validate_mnemonic(&mnemonic).unwrap());

        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 12);
    }

    #[test]
    fn test_generate_all_strengths() {
        for words in [12, 15, 18, 21, 24] {
            let strength = MnemonicStrength::from_word_count(words).unwrap();
            assert_eq!(strength.word_count(), words);

            let phrase = generate_mnemonic(strength).unwrap();
            assert_eq!(phrase.split_whitespace().count(), words);
            assert_eq!(parse_mnemonic(&phrase).unwrap().word_count(), words);
        }
    }

    #[test]
    fn test_generate_is_random() {
        let a = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        let b = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_mnemonic() {
        let invalid = "invalid mnemonic phrase test test test test test test test test test";

        assert!(validate_mnemonic(TEST_MNEMONIC).unwrap());
        assert!(matches!(validate_mnemonic(invalid), Err(Error::Mnemonic(_))));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // Valid words, wrong final checksum word
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(parse_mnemonic(phrase).is_err());
    }

    #[test]
    fn test_unsupported_word_count() {
        assert!(MnemonicStrength::from_word_count(13).is_err());
        assert!(MnemonicStrength::from_word_count(0).is_err());
    }
}
