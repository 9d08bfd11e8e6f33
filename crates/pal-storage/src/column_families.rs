//! RocksDB column family definitions.

/// Accounts: account_id → Account
pub const CF_ACCOUNTS: &str = "accounts";

/// Fingerprint uniqueness index: fingerprint → account_id
pub const CF_ACCOUNTS_BY_FINGERPRINT: &str = "accounts_by_fingerprint";

/// Process-wide settings: key → GlobalSetting
pub const CF_GLOBAL_SETTINGS: &str = "global_settings";

/// Get all column family names
pub fn all_column_families() -> Vec<&'static str> {
    vec![CF_ACCOUNTS, CF_ACCOUNTS_BY_FINGERPRINT, CF_GLOBAL_SETTINGS]
}
