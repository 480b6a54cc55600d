//! Persisted Store
//!
//! Holds the active account identifier and the list of linked accounts.
//! The whole state is one small JSON document; every mutation rewrites it
//! atomically (temp file + rename) before the in-memory copy is replaced,
//! so a failed write leaves both untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::provider::AccountId;

/// A linked account as shown in the accounts table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    /// Customer name on the account
    #[serde(default)]
    pub name: String,

    /// Institution the account is held at
    #[serde(default, alias = "company")]
    pub institution_name: String,

    /// Empty for records written before ids were stored
    #[serde(default)]
    pub account_id: AccountId,

    #[serde(default)]
    pub linked_at: Option<DateTime<Utc>>,
}

/// Everything the store persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub account_id: Option<AccountId>,

    #[serde(default)]
    pub linked_accounts: Vec<LinkedAccount>,
}

/// Result of an unlink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlinked {
    pub removed: usize,
    /// The unlinked id was the active one and has been cleared
    pub was_active: bool,
}

/// Errors that can occur in the store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Typed access to the persisted dashboard state
pub struct Store {
    path: Option<PathBuf>,
    state: RwLock<StoreState>,
}

impl Store {
    /// Open the store at `path`, starting empty if the file does not exist
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            linked_accounts = state.linked_accounts.len(),
            "Opened store"
        );

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// A store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    pub async fn account_id(&self) -> Option<AccountId> {
        self.state.read().await.account_id.clone()
    }

    pub async fn set_account_id(&self, id: AccountId) -> StoreResult<()> {
        self.update(|state| state.account_id = Some(id)).await
    }

    pub async fn linked_accounts(&self) -> Vec<LinkedAccount> {
        self.state.read().await.linked_accounts.clone()
    }

    /// Append a record and return the new list length
    pub async fn append_linked_account(&self, account: LinkedAccount) -> StoreResult<usize> {
        self.update(|state| {
            state.linked_accounts.push(account);
            state.linked_accounts.len()
        })
        .await
    }

    /// Remove every record for `id`, clearing the active id if it matches
    pub async fn unlink(&self, id: &AccountId) -> StoreResult<Unlinked> {
        self.update(|state| {
            let before = state.linked_accounts.len();
            state
                .linked_accounts
                .retain(|account| account.account_id.is_empty() || &account.account_id != id);
            let removed = before - state.linked_accounts.len();

            let was_active = state.account_id.as_ref() == Some(id);
            if was_active {
                state.account_id = None;
            }

            Unlinked {
                removed,
                was_active,
            }
        })
        .await
    }

    /// Apply `f` to a copy of the state, persist it, then publish it
    async fn update<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut StoreState) -> R,
    {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let result = f(&mut next);

        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }

        *guard = next;
        Ok(result)
    }
}

async fn persist(path: &Path, state: &StoreState) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let bytes = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn linked(name: &str, institution: &str, id: &str) -> LinkedAccount {
        LinkedAccount {
            name: name.to_string(),
            institution_name: institution.to_string(),
            account_id: AccountId::new(id),
            linked_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = Store::in_memory();
        assert_eq!(store.account_id().await, None);
        assert!(store.linked_accounts().await.is_empty());
        assert!(store.path().is_none());
    }

    #[tokio::test]
    async fn test_append_keeps_link_order() {
        let store = Store::in_memory();
        store.append_linked_account(linked("Ada", "Trove", "acc_1")).await.unwrap();
        let len = store.append_linked_account(linked("Ada", "Trove", "acc_1")).await.unwrap();

        assert_eq!(len, 2);
        let names: Vec<_> = store
            .linked_accounts()
            .await
            .into_iter()
            .map(|a| a.account_id)
            .collect();
        assert_eq!(names, vec![AccountId::new("acc_1"), AccountId::new("acc_1")]);
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let store = Store::open(&path).await.unwrap();
            store.set_account_id(AccountId::new("acc_1")).await.unwrap();
            store.append_linked_account(linked("Ada", "Trove", "acc_1")).await.unwrap();
            store.append_linked_account(linked("Bola", "Risevest", "acc_2")).await.unwrap();
        }

        let reopened = Store::open(&path).await.unwrap();
        assert_eq!(reopened.account_id().await, Some(AccountId::new("acc_1")));
        let accounts = reopened.linked_accounts().await;
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].institution_name, "Risevest");
    }

    #[tokio::test]
    async fn test_unlink_removes_matching_and_clears_active() {
        let store = Store::in_memory();
        store.set_account_id(AccountId::new("acc_2")).await.unwrap();
        store.append_linked_account(linked("Ada", "Trove", "acc_1")).await.unwrap();
        store.append_linked_account(linked("Bola", "Risevest", "acc_2")).await.unwrap();

        let result = store.unlink(&AccountId::new("acc_2")).await.unwrap();
        assert_eq!(
            result,
            Unlinked {
                removed: 1,
                was_active: true
            }
        );
        assert_eq!(store.account_id().await, None);
        assert_eq!(store.linked_accounts().await.len(), 1);

        let result = store.unlink(&AccountId::new("acc_9")).await.unwrap();
        assert_eq!(result.removed, 0);
        assert!(!result.was_active);
    }

    #[tokio::test]
    async fn test_reads_legacy_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            r#"{"accountId":"acc_1","linkedAccounts":[{"name":"Ada","company":"Trove"}]}"#,
        )
        .unwrap();

        let store = Store::open(&path).await.unwrap();
        let accounts = store.linked_accounts().await;
        assert_eq!(accounts[0].institution_name, "Trove");
        assert!(accounts[0].account_id.is_empty());
        assert!(accounts[0].linked_at.is_none());

        // Records without an id are never matched by unlink
        let result = store.unlink(&AccountId::new("")).await.unwrap();
        assert_eq!(result.removed, 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Store::open(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        // The store path is a directory, so the final rename fails
        let path = dir.path().join("store.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let store = Store {
            path: Some(path),
            state: RwLock::new(StoreState::default()),
        };

        assert!(store.set_account_id(AccountId::new("acc_1")).await.is_err());
        assert_eq!(store.account_id().await, None);
    }
}
