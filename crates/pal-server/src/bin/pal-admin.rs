//! Out-of-band administration for a pal database.
//!
//! Run against a stopped server: RocksDB allows a single writer process.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pal_accounts::{seed_salt, AccountService, AccountStore, SaltProvider};
use pal_crypto::{generate_random_bytes, SALT_SIZE};
use pal_storage::RocksDbStorage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "pal-admin")]
#[command(about = "Administer a pal account database", long_about = None)]
struct Cli {
    /// RocksDB directory
    #[arg(long, env = "DATABASE_PATH", default_value = "./data/pal.db")]
    database_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and store the fingerprint salt
    InitSalt {
        /// Replace an existing salt. Every existing account becomes unreachable.
        #[arg(long)]
        force: bool,
    },

    /// Print a stored account
    ShowAccount {
        /// Account ID
        account_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pal_admin=info,pal_accounts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Some(parent) = cli.database_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let storage = Arc::new(
        RocksDbStorage::open(&cli.database_path)
            .with_context(|| format!("Failed to open {}", cli.database_path.display()))?,
    );

    match cli.command {
        Commands::InitSalt { force } => init_salt(&storage, force).await,
        Commands::ShowAccount { account_id } => show_account(storage, account_id).await,
    }
}

async fn init_salt(storage: &RocksDbStorage, force: bool) -> Result<()> {
    let salt = Zeroizing::new(generate_random_bytes::<SALT_SIZE>());

    if seed_salt(storage, salt.as_slice(), force).await? {
        tracing::info!(salt_len = SALT_SIZE, "Fingerprint salt written");
        println!("Salt initialized ({} bytes)", SALT_SIZE);
    } else {
        println!("Salt already present; pass --force to replace it");
    }

    Ok(())
}

async fn show_account(storage: Arc<RocksDbStorage>, account_id: Uuid) -> Result<()> {
    let salt = Arc::new(SaltProvider::new(Arc::clone(&storage)));
    let accounts = AccountService::new(storage, salt);

    let account = accounts.get_account(account_id).await?;
    let created_at = chrono::DateTime::from_timestamp(account.created_at as i64, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| account.created_at.to_string());

    println!("Account ID:  {}", account.account_id);
    println!("Fingerprint: {}", account.fingerprint);
    println!("Created:     {}", created_at);

    Ok(())
}
