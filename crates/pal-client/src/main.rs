/*!
 * Pal Client
 *
 * Command-line client for the pal account server:
 * 1. Create an anonymous account bound to this machine's address
 * 2. Log in with the account ID to obtain a session token
 * 3. Verify the stored token against the server
 *
 * Usage:
 *   cargo run -p pal-client -- create-account
 *   cargo run -p pal-client -- login
 *   cargo run -p pal-client -- verify
 *   cargo run -p pal-client -- show
 */

mod commands;
mod storage;
mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};

// CLI structure
#[derive(Parser)]
#[command(name = "pal-client")]
#[command(about = "Command-line client for pal accounts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pal server URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or recover) the account for this machine's address
    CreateAccount,
    /// Log in and store a session token
    Login {
        /// Account ID; defaults to the stored account
        account_id: Option<String>,
    },
    /// Check the stored session token against the server
    Verify,
    /// Show the stored account and session
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = storage::SessionStore::default();

    match cli.command {
        Commands::CreateAccount => commands::account::create_account(&cli.server, &store).await?,

        Commands::Login { account_id } => {
            commands::account::login(&cli.server, &store, account_id.as_deref()).await?
        }

        Commands::Verify => commands::account::verify(&cli.server, &store).await?,

        Commands::Show => commands::show::show_session(&store)?,
    }

    Ok(())
}
