/*!
 * Show session command
 */

use anyhow::Result;
use colored::*;

use crate::storage::SessionStore;

pub fn show_session(store: &SessionStore) -> Result<()> {
    println!("{}", "=== Stored Account ===".bold().cyan());

    let session = store.load()?;
    println!("\n  Account ID: {}", session.account_id);

    match (&session.auth_token, &session.expires_at) {
        (Some(token), Some(expires_at)) => {
            println!("\n{}", "Session:".bold());
            println!("  Refresh By: {}", expires_at);
            let preview: String = token.chars().take(30).collect();
            println!("  Auth Token: {}...", preview.dimmed());
            if session.needs_login() {
                println!("  {}", "Token is due for renewal; run 'login'".yellow());
            }
        }
        _ => println!("\n{}", "No active session found".yellow()),
    }

    Ok(())
}
