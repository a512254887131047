//! Append-only per-chain account registry

use tracing::{info, warn};

use crate::account::Account;
use crate::crypto::keys::{build_path, derive, ChainKind, MAX_ACCOUNT_INDEX};
use crate::crypto::seed::Seed;
use crate::error::{Error, Result};

/// Ordered accounts derived for one chain, plus the next index to use.
///
/// Entries are only ever appended. A failed derivation leaves the registry
/// untouched; moving past a bad index takes an explicit [`skip_index`].
///
/// [`skip_index`]: AccountRegistry::skip_index
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    chain: ChainKind,
    next_index: u32,
    accounts: Vec<Account>,
    skipped: Vec<u32>,
}

impl AccountRegistry {
    pub fn new(chain: ChainKind) -> Self {
        Self {
            chain,
            next_index: 0,
            accounts: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn chain(&self) -> ChainKind {
        self.chain
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Derive the account at `next_index`, append it and advance the counter
    pub fn next_account(&mut self, seed: &Seed) -> Result<Account> {
        let index = self.next_index;
        let path = build_path(self.chain, u64::from(index))?;

        let account = match derive(seed, &path, self.chain) {
            Ok(account) => account,
            Err(e) => {
                warn!(chain = %self.chain, index, error = %e, "account derivation failed");
                return Err(e);
            }
        };

        self.accounts.push(account.clone());
        self.next_index = index + 1;

        info!(chain = %self.chain, index, "account added to registry");
        Ok(account)
    }

    /// Abandon `index` after its derivation failed, advancing past it.
    ///
    /// `index` must be the current `next_index`; the skip is recorded.
    pub fn skip_index(&mut self, index: u32) -> Result<()> {
        if index != self.next_index || u64::from(index) > MAX_ACCOUNT_INDEX {
            return Err(Error::InvalidIndex(u64::from(index)));
        }

        self.skipped.push(index);
        self.next_index = index + 1;

        warn!(chain = %self.chain, index, "account index skipped");
        Ok(())
    }

    /// Accounts in the order they were derived
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Accounts most-recent first, for newest-on-top displays
    pub fn accounts_newest_first(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().rev()
    }

    /// Look up an account by its index
    pub fn get(&self, index: u32) -> Option<&Account> {
        self.accounts.iter().find(|account| account.index() == index)
    }

    /// Indices abandoned through [`skip_index`](AccountRegistry::skip_index)
    pub fn skipped(&self) -> &[u32] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
