//! Test helpers and doubles for session service tests.

use crate::*;
use async_trait::async_trait;
use pal_accounts::{Account, AccountError, AccountStore, Provisioned};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_KEY: &[u8] = b"pal-session-test-key-0123456789abcdef";
pub const TEST_ISSUER: &str = "pal-server.test";
pub const TEST_AUDIENCE: &str = "pal-client.test";

/// In-memory account store that counts every lookup
#[derive(Default)]
pub struct CountingAccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
    lookups: AtomicUsize,
}

impl CountingAccountStore {
    pub fn insert(&self, account_id: Uuid) -> Account {
        let account = Account {
            account_id,
            fingerprint: format!("fp-{}", account_id),
            created_at: current_timestamp(),
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(account_id, account.clone());
        account
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for CountingAccountStore {
    async fn create_account(&self, _client_ip: IpAddr) -> pal_accounts::Result<Provisioned> {
        Err(AccountError::Other("not supported by test double".to_string()))
    }

    async fn provision_or_retrieve(&self, _fingerprint: &str) -> pal_accounts::Result<Provisioned> {
        Err(AccountError::Other("not supported by test double".to_string()))
    }

    async fn get_account(&self, account_id: Uuid) -> pal_accounts::Result<Account> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .ok_or(AccountError::NotFound(account_id))
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> pal_accounts::Result<Option<Account>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.fingerprint == fingerprint)
            .cloned())
    }
}

/// Helper to create a session service over the counting store
pub fn create_test_session_service(
    lifetimes: TokenLifetimes,
) -> (SessionService<CountingAccountStore>, Arc<CountingAccountStore>) {
    let store = Arc::new(CountingAccountStore::default());
    let service = SessionService::with_lifetimes(
        Arc::clone(&store),
        TEST_KEY,
        TEST_ISSUER.to_string(),
        TEST_AUDIENCE.to_string(),
        lifetimes,
    )
    .unwrap();
    (service, store)
}

/// Claims valid right now for `account_id`, with every field overridable by the caller
pub fn claims_for(account_id: Uuid) -> TokenClaims {
    let now = current_timestamp();
    TokenClaims {
        iss: TEST_ISSUER.to_string(),
        sub: account_id.to_string(),
        aud: vec![TEST_AUDIENCE.to_string()],
        iat: now,
        exp: now + 3600,
        nbf: now,
        jti: Uuid::new_v4().to_string(),
    }
}

/// Sign arbitrary claims with the test key
pub fn sign_with(claims: &TokenClaims, key: &[u8], alg: jsonwebtoken::Algorithm) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    encode(&Header::new(alg), claims, &EncodingKey::from_secret(key)).unwrap()
}
