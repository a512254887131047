//! BIP44 derivation paths

use std::fmt;
use std::str::FromStr;

use crate::crypto::keys::ChainKind;
use crate::error::{Error, Result};

/// First hardened child index (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Largest account index that can still be hardened (2^31 - 1)
pub const MAX_ACCOUNT_INDEX: u64 = (HARDENED_OFFSET - 1) as u64;

/// BIP44 purpose constant
pub const PURPOSE: u32 = 44;

/// One segment of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    index: u32,
    hardened: bool,
}

impl ChildIndex {
    /// A hardened segment (`index'`)
    pub fn hardened(index: u32) -> Result<Self> {
        Self::new(index, true)
    }

    /// A normal segment
    pub fn normal(index: u32) -> Result<Self> {
        Self::new(index, false)
    }

    fn new(index: u32, hardened: bool) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(Error::InvalidPath(format!("Segment index out of range: {}", index)));
        }
        Ok(Self { index, hardened })
    }

    /// The index without the hardened bit
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// The 32-bit child number fed to CKD (hardened bit set when hardened)
    pub fn to_u32(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(component: &str) -> Result<Self> {
        let marked = component
            .strip_suffix('\'')
            .or_else(|| component.strip_suffix('h'));
        let (digits, hardened) = match marked {
            Some(digits) => (digits, true),
            None => (component, false),
        };

        let index = digits
            .parse::<u32>()
            .map_err(|_| {
                Error::InvalidPath(format!("Invalid derivation path component: {}", component))
            })?;

        Self::new(index, hardened)
    }
}

/// An ordered sequence of child segments below the master key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    segments: Vec<ChildIndex>,
}

impl DerivationPath {
    pub fn new(segments: Vec<ChildIndex>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[ChildIndex] {
        &self.segments
    }

    /// The account segment (`m/purpose'/coin'/account'`), if the path is deep enough
    pub fn account_index(&self) -> Option<u32> {
        self.segments.get(2).map(ChildIndex::index)
    }

    pub fn is_all_hardened(&self) -> bool {
        self.segments.iter().all(ChildIndex::is_hardened)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// Parse a BIP-32 derivation path such as `m/44'/60'/0'/0/0`
    fn from_str(path: &str) -> Result<Self> {
        let rest = match path.strip_prefix('m') {
            Some(rest) => rest,
            None => return Err(Error::InvalidPath(format!("Invalid derivation path: {}", path))),
        };
        if rest.is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        let rest = rest
            .strip_prefix('/')
            .ok_or_else(|| Error::InvalidPath(format!("Invalid derivation path: {}", path)))?;

        let segments = rest
            .split('/')
            .map(str::parse)
            .collect::<Result<Vec<ChildIndex>>>()?;

        Ok(Self::new(segments))
    }
}

/// Build the standard account path for a chain.
///
/// Ethereum: `m/44'/60'/account'/0/0`. Solana: `m/44'/501'/account'/0'`.
pub fn build_path(chain: ChainKind, account_index: u64) -> Result<DerivationPath> {
    if account_index > MAX_ACCOUNT_INDEX {
        return Err(Error::InvalidIndex(account_index));
    }
    let account = account_index as u32;

    let mut segments = vec![
        ChildIndex::hardened(PURPOSE)?,
        ChildIndex::hardened(chain.coin_type())?,
        ChildIndex::hardened(account)?,
    ];

    match chain {
        ChainKind::Ethereum => {
            // external chain, single address per account
            segments.push(ChildIndex::normal(0)?);
            segments.push(ChildIndex::normal(0)?);
        }
        ChainKind::Solana => {
            segments.push(ChildIndex::hardened(0)?);
        }
    }

    Ok(DerivationPath::new(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_numbers(path: &DerivationPath) -> Vec<u32> {
        path.segments().iter().map(ChildIndex::to_u32).collect()
    }

    #[test]
    fn test_ethereum_path() {
        let path = build_path(ChainKind::Ethereum, 3).unwrap();
        assert_eq!(path.to_string(), "m/44'/60'/3'/0/0");
        assert_eq!(
            child_numbers(&path),
            vec![44 | HARDENED_OFFSET, 60 | HARDENED_OFFSET, 3 | HARDENED_OFFSET, 0, 0]
        );
        assert_eq!(path.account_index(), Some(3));
        assert!(!path.is_all_hardened());
    }

    #[test]
    fn test_solana_path() {
        let path = build_path(ChainKind::Solana, 3).unwrap();
        assert_eq!(path.to_string(), "m/44'/501'/3'/0'");
        assert_eq!(
            child_numbers(&path),
            vec![44 | HARDENED_OFFSET, 501 | HARDENED_OFFSET, 3 | HARDENED_OFFSET, HARDENED_OFFSET]
        );
        assert!(path.is_all_hardened());
    }

    #[test]
    fn test_index_boundary() {
        for chain in ChainKind::ALL {
            assert!(build_path(chain, MAX_ACCOUNT_INDEX).is_ok());
            assert!(matches!(
                build_path(chain, 2_147_483_648),
                Err(Error::InvalidIndex(2_147_483_648))
            ));
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for chain in ChainKind::ALL {
            let path = build_path(chain, 7).unwrap();
            let parsed: DerivationPath = path.to_string().parse().unwrap();
            assert_eq!(parsed, path);
        }
    }

    #[test]
    fn test_parse_alternate_hardened_marker() {
        let path: DerivationPath = "m/44h/501h/0h/0h".parse().unwrap();
        assert_eq!(path, build_path(ChainKind::Solana, 0).unwrap());
    }

    #[test]
    fn test_parse_master() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["44'/60'/0'", "m/44'/x/0'", "m/", "m//0", "m/2147483648", "n/0", "m0"] {
            assert!(
                matches!(bad.parse::<DerivationPath>(), Err(Error::InvalidPath(_))),
                "{} should be rejected",
                bad
            );
        }
    }
}
