/*!
 * Account commands
 */

use anyhow::{Context, Result};
use colored::*;
use reqwest::StatusCode;
use uuid::Uuid;

use crate::storage::SessionStore;
use crate::types::{AccountSession, CreateAccountResponse, LoginResponse};

pub async fn create_account(server: &str, store: &SessionStore) -> Result<()> {
    println!("{}", "=== Create Account ===".bold().cyan());

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/v1/account", server))
        .send()
        .await
        .context("Failed to create account")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        anyhow::bail!("Account creation failed {}: {}", status, error_text);
    }

    let result: CreateAccountResponse = response.json().await?;
    let account_id = match (result.success, result.account_id) {
        (true, Some(account_id)) => account_id,
        _ => anyhow::bail!("Server refused to create an account"),
    };

    // Keep an existing session only if it belongs to the same account
    let session = match store.load() {
        Ok(existing) if existing.account_id == account_id => existing,
        _ => AccountSession::new(account_id),
    };
    store.save(&session)?;

    println!("{}", "✓ Account ready".green());
    println!("  Account ID: {}", account_id);
    println!("  Saved to: {}", store.account_path().display());

    Ok(())
}

pub async fn login(server: &str, store: &SessionStore, account_id: Option<&str>) -> Result<()> {
    println!("{}", "=== Login ===".bold().cyan());

    let account_id = match account_id {
        Some(id) => id.to_string(),
        None => store.load()?.account_id.to_string(),
    };

    let client = reqwest::Client::new();
    let request = serde_json::json!({ "account_id": account_id });
    let response = client
        .post(format!("{}/v1/account/login", server))
        .json(&request)
        .send()
        .await
        .context("Failed to log in")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        anyhow::bail!("Login failed {}: {}", status, error_text);
    }

    let result: LoginResponse = response.json().await?;
    let (token, expires_at) = match (result.success, result.auth_token, result.expires_at) {
        (true, Some(token), Some(expires_at)) => (token, expires_at),
        _ => anyhow::bail!(
            "Login refused: {}",
            result.error.unwrap_or_else(|| "unknown".to_string())
        ),
    };

    let account_id = Uuid::parse_str(account_id.trim())?;
    store.save(&AccountSession {
        account_id,
        auth_token: Some(token),
        expires_at: Some(expires_at.clone()),
    })?;

    println!("{}", "✓ Logged in".green());
    println!("  Account ID: {}", account_id);
    println!("  Refresh By: {}", expires_at);

    Ok(())
}

pub async fn verify(server: &str, store: &SessionStore) -> Result<()> {
    println!("{}", "=== Verify Session ===".bold().cyan());

    let session = store.load()?;
    let token = session
        .auth_token
        .context("No session token stored. Run 'login' first.")?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/v1/account/verify", server))
        .bearer_auth(&token)
        .send()
        .await
        .context("Failed to verify token")?;

    match response.status() {
        StatusCode::OK => println!("{}", "✓ Token is valid".green()),
        StatusCode::UNAUTHORIZED => println!("{}", "✗ Token was rejected; run 'login'".red()),
        status => {
            let error_text = response.text().await?;
            anyhow::bail!("Verification failed {}: {}", status, error_text);
        }
    }

    Ok(())
}
