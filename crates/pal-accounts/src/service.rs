//! Account service implementation.

mod provisioning;

use crate::{errors::*, salt::SaltProvider, traits::*, types::*};
use async_trait::async_trait;
use pal_crypto::FingerprintParams;
use pal_storage::{Storage, CF_ACCOUNTS};
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

/// Account service backed by a [`Storage`] implementation
pub struct AccountService<S: Storage> {
    storage: Arc<S>,
    salt: Arc<SaltProvider<S>>,
    params: FingerprintParams,
}

impl<S: Storage + 'static> AccountService<S> {
    /// Create a new account service with default fingerprint parameters
    pub fn new(storage: Arc<S>, salt: Arc<SaltProvider<S>>) -> Self {
        Self::with_params(storage, salt, FingerprintParams::default())
    }

    /// Create a new account service with explicit fingerprint parameters
    pub fn with_params(
        storage: Arc<S>,
        salt: Arc<SaltProvider<S>>,
        params: FingerprintParams,
    ) -> Self {
        Self {
            storage,
            salt,
            params,
        }
    }
}

#[async_trait]
impl<S: Storage + 'static> AccountStore for AccountService<S> {
    async fn create_account(&self, client_ip: IpAddr) -> Result<Provisioned> {
        let fingerprint = self.fingerprint(client_ip).await?;
        self.provision_or_retrieve_internal(&fingerprint).await
    }

    async fn provision_or_retrieve(&self, fingerprint: &str) -> Result<Provisioned> {
        self.provision_or_retrieve_internal(fingerprint).await
    }

    async fn get_account(&self, account_id: Uuid) -> Result<Account> {
        self.storage
            .get(CF_ACCOUNTS, &account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<Account>> {
        self.find_by_fingerprint_internal(fingerprint).await
    }
}
