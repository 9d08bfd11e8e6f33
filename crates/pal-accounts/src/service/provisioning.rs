//! Fingerprinting and lookup-or-create provisioning.

use crate::{errors::*, types::*};
use pal_crypto::{current_timestamp, fingerprint_ip, log_tag};
use pal_storage::{BatchExt, Storage, StorageError, CF_ACCOUNTS, CF_ACCOUNTS_BY_FINGERPRINT};
use std::net::IpAddr;
use tracing::{info, warn};
use uuid::Uuid;

use super::AccountService;

impl<S: Storage + 'static> AccountService<S> {
    /// Derive the fingerprint of a client address
    ///
    /// PBKDF2 is CPU bound, so the derivation runs on the blocking pool.
    pub(crate) async fn fingerprint(&self, client_ip: IpAddr) -> Result<String> {
        let salt = self.salt.salt().await?;
        let params = self.params;

        let fingerprint = tokio::task::spawn_blocking(move || fingerprint_ip(client_ip, &salt, &params))
            .await
            .map_err(|e| AccountError::Other(format!("Fingerprint task failed: {}", e)))??;

        Ok(fingerprint)
    }

    pub(crate) async fn find_by_fingerprint_internal(
        &self,
        fingerprint: &str,
    ) -> Result<Option<Account>> {
        let account_id: Option<Uuid> = self
            .storage
            .get(CF_ACCOUNTS_BY_FINGERPRINT, &fingerprint)
            .await?;

        match account_id {
            Some(account_id) => {
                let account = self
                    .storage
                    .get(CF_ACCOUNTS, &account_id)
                    .await?
                    .ok_or(AccountError::NotFound(account_id))?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    pub(crate) async fn provision_or_retrieve_internal(
        &self,
        fingerprint: &str,
    ) -> Result<Provisioned> {
        if let Some(account) = self.find_by_fingerprint_internal(fingerprint).await? {
            info!(
                account_id = %account.account_id,
                fingerprint = %log_tag(fingerprint),
                "Returning existing account"
            );
            return Ok(Provisioned {
                account,
                created: false,
            });
        }

        let account = Account {
            account_id: Uuid::new_v4(),
            fingerprint: fingerprint.to_string(),
            created_at: current_timestamp(),
        };

        let mut batch = self.storage.batch();
        batch.put(CF_ACCOUNTS, &account.account_id, &account)?;
        batch.put(CF_ACCOUNTS_BY_FINGERPRINT, &account.fingerprint, &account.account_id)?;

        match self
            .storage
            .commit_unless_exists(CF_ACCOUNTS_BY_FINGERPRINT, &account.fingerprint, batch)
            .await
        {
            Ok(()) => {
                info!(
                    account_id = %account.account_id,
                    fingerprint = %log_tag(fingerprint),
                    "Created new account"
                );
                Ok(Provisioned {
                    account,
                    created: true,
                })
            }
            Err(StorageError::AlreadyExists { .. }) => {
                warn!(
                    fingerprint = %log_tag(fingerprint),
                    "Concurrent request created this account first"
                );
                Err(AccountError::FingerprintConflict)
            }
            Err(e) => Err(e.into()),
        }
    }
}
