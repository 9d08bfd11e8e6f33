/*!
 * Local storage for the account session
 */

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::types::AccountSession;

/// Directory holding `account.json`
pub struct SessionStore {
    dir: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new("./.session")
    }
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn account_path(&self) -> PathBuf {
        self.dir.join("account.json")
    }

    pub fn save(&self, session: &AccountSession) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(self.account_path(), json)?;
        Ok(())
    }

    pub fn load(&self) -> Result<AccountSession> {
        let json = fs::read_to_string(self.account_path())
            .context("Failed to load account. Run 'create-account' first.")?;
        let session = serde_json::from_str(&json)?;
        Ok(session)
    }
}
