//! web3wallet CLI
//!
//! Generates recovery phrases and derives Ethereum and Solana accounts from
//! them. Nothing is written to disk.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use web3wallet::{ChainKind, DisplayOrder, EngineConfig};

#[derive(Parser)]
#[command(name = "web3wallet")]
#[command(about = "Deterministic Ethereum and Solana key derivation from a recovery phrase")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new recovery phrase
    Mnemonic {
        /// Number of words (12, 15, 18, 21 or 24)
        #[arg(short, long)]
        words: Option<usize>,
    },
    /// Print the 64-byte BIP39 seed for a phrase
    Seed {
        /// Recovery phrase
        #[arg(short, long, env = "WEB3WALLET_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
        /// Optional BIP39 passphrase
        #[arg(short, long)]
        passphrase: Option<String>,
    },
    /// Derive the next accounts for a chain
    Generate {
        /// Chain to derive for (ethereum or solana)
        #[arg(short, long)]
        chain: ChainKind,
        /// Number of accounts to derive
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
        /// Recovery phrase to import; a new one is generated when omitted
        #[arg(short, long, env = "WEB3WALLET_MNEMONIC", hide_env_values = true)]
        mnemonic: Option<String>,
        /// Optional BIP39 passphrase
        #[arg(short, long)]
        passphrase: Option<String>,
        /// Word count when generating a new phrase
        #[arg(short, long)]
        words: Option<usize>,
        /// Listing order (newest-first or insertion)
        #[arg(long)]
        order: Option<DisplayOrder>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the derivation path for an account index
    Path {
        #[arg(short, long)]
        chain: ChainKind,
        #[arg(short, long)]
        index: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = EngineConfig::from_env()?;

    match cli.command {
        Commands::Mnemonic { words } => {
            if let Some(words) = words {
                config.mnemonic_words = words;
            }
            commands::mnemonic(&config)
        }
        Commands::Seed { mnemonic, passphrase } => {
            if passphrase.is_some() {
                config.passphrase = passphrase;
            }
            commands::seed(&config, &mnemonic)
        }
        Commands::Generate {
            chain,
            count,
            mnemonic,
            passphrase,
            words,
            order,
            json,
        } => {
            if passphrase.is_some() {
                config.passphrase = passphrase;
            }
            if let Some(words) = words {
                config.mnemonic_words = words;
            }
            if let Some(order) = order {
                config.display_order = order;
            }
            config.validate()?;
            commands::generate(&config, chain, count, mnemonic.as_deref(), json)
        }
        Commands::Path { chain, index } => commands::path(chain, index),
    }
}
