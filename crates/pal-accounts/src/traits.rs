//! Account trait definitions.

use crate::{errors::Result, types::*};
use async_trait::async_trait;
use std::net::IpAddr;
use uuid::Uuid;

/// Account provisioning and lookup
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fingerprint a resolved client address and provision or retrieve its account
    async fn create_account(&self, client_ip: IpAddr) -> Result<Provisioned>;

    /// Return the account for `fingerprint`, creating it if absent
    async fn provision_or_retrieve(&self, fingerprint: &str) -> Result<Provisioned>;

    /// Get account by ID
    async fn get_account(&self, account_id: Uuid) -> Result<Account>;

    /// Find the account owning a fingerprint
    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<Account>>;
}
