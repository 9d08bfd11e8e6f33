use anyhow::{Context, Result};
use pal_accounts::{AccountError, AccountService, SaltProvider};
use pal_sessions::{SessionService, TokenLifetimes};
use pal_storage::RocksDbStorage;
use std::sync::Arc;

use crate::config::Config;

/// Account service over the production store
pub type Accounts = AccountService<RocksDbStorage>;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub storage: Arc<RocksDbStorage>,
    pub salt: Arc<SaltProvider<RocksDbStorage>>,
    pub account_service: Arc<Accounts>,
    pub session_service: Arc<SessionService<Accounts>>,
}

impl AppState {
    /// Open the configured database and build every service on top of it
    pub async fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let storage = Arc::new(RocksDbStorage::open(&config.database_path)?);
        Self::with_storage(config, storage).await
    }

    /// Build services over an already opened store
    pub async fn with_storage(config: Config, storage: Arc<RocksDbStorage>) -> Result<Self> {
        let salt = Arc::new(SaltProvider::new(Arc::clone(&storage)));

        // A missing salt is not fatal; readiness reports it until it is seeded
        match salt.salt().await {
            Ok(_) => {}
            Err(e @ AccountError::ConfigurationMissing(_)) => {
                tracing::warn!("{}; run `pal-admin init-salt`", e);
            }
            Err(e) => return Err(e.into()),
        }

        let account_service = Arc::new(AccountService::with_params(
            Arc::clone(&storage),
            Arc::clone(&salt),
            config.fingerprint,
        ));

        let lifetimes = TokenLifetimes {
            token_ttl: config.token_lifetime,
            ..TokenLifetimes::default()
        };
        let session_service = Arc::new(SessionService::with_lifetimes(
            Arc::clone(&account_service),
            &config.jwt_key,
            config.jwt_issuer.clone(),
            config.jwt_audience.clone(),
            lifetimes,
        )?);

        Ok(AppState {
            config,
            storage,
            salt,
            account_service,
            session_service,
        })
    }
}
