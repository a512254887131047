//! Subcommand handlers

use anyhow::Context;
use serde_json::json;
use tracing::{info, warn};

use web3wallet::{
    build_path, derive_seed_from_mnemonic, generate_mnemonic, Account, ChainKind, DisplayOrder,
    EngineConfig, Session,
};

pub fn mnemonic(config: &EngineConfig) -> anyhow::Result<()> {
    let phrase = generate_mnemonic(config.strength()?)?;
    println!("{}", phrase);
    Ok(())
}

pub fn seed(config: &EngineConfig, phrase: &str) -> anyhow::Result<()> {
    let seed = derive_seed_from_mnemonic(phrase, config.passphrase.as_deref())
        .context("failed to derive seed")?;
    println!("{}", hex::encode(seed));
    Ok(())
}

pub fn generate(
    config: &EngineConfig,
    chain: ChainKind,
    count: u32,
    phrase: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let session = Session::from_config(config, phrase)?;
    let generated_phrase = phrase.is_none();

    fill_accounts(
        count,
        || session.generate_account(chain).map(|_| ()),
        || {
            let index = session.next_index(chain)?;
            warn!(%chain, index, "skipping account index after failed derivation");
            session.skip_index(chain, index)
        },
    )?;

    let mut accounts = session.accounts(chain)?;
    if config.display_order == DisplayOrder::NewestFirst {
        accounts.reverse();
    }
    info!(%chain, count = accounts.len(), "accounts derived");

    if as_json {
        let output = json!({
            "mnemonic": generated_phrase.then(|| session.mnemonic()),
            "chain": chain,
            "accounts": accounts,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if generated_phrase {
        println!("Seed phrase: {}", session.mnemonic());
        println!();
    }
    for account in &accounts {
        print_account(account);
    }
    Ok(())
}

/// Append `count` accounts, skipping past indices whose derivation fails.
///
/// Only recoverable failures are skipped; anything else aborts.
fn fill_accounts<G, S>(count: u32, mut generate: G, mut skip: S) -> web3wallet::Result<()>
where
    G: FnMut() -> web3wallet::Result<()>,
    S: FnMut() -> web3wallet::Result<()>,
{
    let mut appended = 0;
    while appended < count {
        match generate() {
            Ok(()) => appended += 1,
            Err(e) if e.is_recoverable() => skip()?,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

pub fn path(chain: ChainKind, index: u64) -> anyhow::Result<()> {
    println!("{}", build_path(chain, index)?);
    Ok(())
}

fn print_account(account: &Account) {
    println!("{} wallet #{}", account.chain(), account.index() + 1);
    println!("  path:        {}", account.path());
    println!("  public key:  {}", account.public_key());
    println!("  private key: {}", account.private_key());
}
