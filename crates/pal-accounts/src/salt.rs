//! Process-wide fingerprint salt.
//!
//! The salt lives in the `global_settings` column family as base64 text. It
//! is read at most once per [`SaltProvider`]; every later call is served from
//! memory. Rotation is not supported: changing the stored salt while the
//! process runs has no effect until restart, and orphans every existing
//! account fingerprint.

use crate::{errors::*, types::*};
use pal_crypto::{base64_decode, base64_encode};
use pal_storage::{Storage, CF_GLOBAL_SETTINGS};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Lazily loaded, write-once salt cache
pub struct SaltProvider<S: Storage> {
    storage: Arc<S>,
    cell: OnceCell<Arc<[u8]>>,
}

impl<S: Storage> SaltProvider<S> {
    /// Create a provider; nothing is read until the first [`salt`](Self::salt) call
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            cell: OnceCell::new(),
        }
    }

    /// Return the salt, loading it from storage on first use
    ///
    /// Concurrent first callers wait on a single load. A failed load leaves
    /// the cache empty, so the next call reads storage again.
    pub async fn salt(&self) -> Result<Arc<[u8]>> {
        let salt = self.cell.get_or_try_init(|| self.load()).await?;
        Ok(Arc::clone(salt))
    }

    /// Whether the salt has been loaded into memory
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    async fn load(&self) -> Result<Arc<[u8]>> {
        let setting: GlobalSetting = self
            .storage
            .get(CF_GLOBAL_SETTINGS, &SALT_SETTING_KEY)
            .await?
            .ok_or_else(|| AccountError::ConfigurationMissing(SALT_SETTING_KEY.to_string()))?;

        let bytes = base64_decode(&setting.value).map_err(|e| AccountError::InvalidSetting {
            key: SALT_SETTING_KEY.to_string(),
            reason: e.to_string(),
        })?;

        if bytes.is_empty() {
            return Err(AccountError::InvalidSetting {
                key: SALT_SETTING_KEY.to_string(),
                reason: "salt is empty".to_string(),
            });
        }

        info!(salt_len = bytes.len(), "Fingerprint salt loaded");
        Ok(Arc::from(bytes))
    }
}

/// Write the salt setting
///
/// Returns `false` without writing when a salt is already stored and
/// `overwrite` is not set. Only meant for out-of-band provisioning.
pub async fn seed_salt<S: Storage>(storage: &S, salt: &[u8], overwrite: bool) -> Result<bool> {
    if salt.is_empty() {
        return Err(AccountError::InvalidSetting {
            key: SALT_SETTING_KEY.to_string(),
            reason: "salt is empty".to_string(),
        });
    }

    if !overwrite && storage.exists(CF_GLOBAL_SETTINGS, &SALT_SETTING_KEY).await? {
        return Ok(false);
    }

    let setting = GlobalSetting {
        key: SALT_SETTING_KEY.to_string(),
        value: base64_encode(salt),
    };
    storage
        .put(CF_GLOBAL_SETTINGS, &SALT_SETTING_KEY, &setting)
        .await?;

    Ok(true)
}
