//! In-process account store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{AccountStore, ConflictKind, StoreError, StoreResult};
use crate::models::{Account, NewAccount};

/// Accounts held in a map behind a single lock; every check-then-write
/// runs under the write guard.
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: NewAccount) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::Conflict(ConflictKind::Email));
        }
        if accounts.values().any(|a| a.username == account.username) {
            return Err(StoreError::Conflict(ConflictKind::Username));
        }
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
            roles: account.roles,
            created_at: Utc::now(),
        };
        accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn update(&self, account: &Account) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.id != account.id && a.username == account.username)
        {
            return Err(StoreError::Conflict(ConflictKind::Username));
        }
        let stored = accounts.get_mut(&account.id).ok_or(StoreError::NotFound)?;
        stored.username = account.username.clone();
        stored.password_hash = account.password_hash.clone();
        stored.roles = account.roles.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use std::collections::BTreeSet;

    fn new_account(email: &str, username: &str) -> NewAccount {
        NewAccount::new(email.into(), username.into(), "digest".into())
    }

    #[tokio::test]
    async fn create_assigns_id_and_created_at() {
        let store = MemoryAccountStore::new();
        let before = Utc::now();
        let acc = store.create(new_account("a@x.com", "alice1")).await.unwrap();
        assert!(acc.created_at >= before);
        assert_eq!(acc.roles, BTreeSet::from([Role::User]));
        let found = store.find_by_id(acc.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
    }

    #[tokio::test]
    async fn create_reports_which_key_collided() {
        let store = MemoryAccountStore::new();
        store.create(new_account("a@x.com", "alice1")).await.unwrap();

        let err = store.create(new_account("a@x.com", "bobby1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ConflictKind::Email)));

        let err = store.create(new_account("b@x.com", "alice1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ConflictKind::Username)));

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn exists_checks_use_default_impls() {
        let store = MemoryAccountStore::new();
        store.create(new_account("a@x.com", "alice1")).await.unwrap();
        assert!(store.exists_by_email("a@x.com").await.unwrap());
        assert!(!store.exists_by_email("b@x.com").await.unwrap());
        assert!(store.exists_by_username("alice1").await.unwrap());
        assert!(!store.exists_by_username("bobby1").await.unwrap());
    }

    #[tokio::test]
    async fn update_keeps_email_and_created_at() {
        let store = MemoryAccountStore::new();
        let acc = store.create(new_account("a@x.com", "alice1")).await.unwrap();
        let mut changed = acc.clone();
        changed.username = "alice2".into();
        changed.email = "evil@x.com".into();
        changed.created_at = Utc::now() + chrono::Duration::days(1);
        let updated = store.update(&changed).await.unwrap();
        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.created_at, acc.created_at);
    }

    #[tokio::test]
    async fn update_rejects_username_of_other_account() {
        let store = MemoryAccountStore::new();
        let a = store.create(new_account("a@x.com", "alice1")).await.unwrap();
        store.create(new_account("b@x.com", "bobby1")).await.unwrap();
        let mut changed = a.clone();
        changed.username = "bobby1".into();
        let err = store.update(&changed).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ConflictKind::Username)));

        // keeping one's own username is not a conflict
        tokio_test::assert_ok!(store.update(&a).await);
    }

    #[tokio::test]
    async fn update_and_delete_missing_is_not_found() {
        let store = MemoryAccountStore::new();
        let acc = store.create(new_account("a@x.com", "alice1")).await.unwrap();
        store.delete(acc.id).await.unwrap();
        assert!(matches!(store.delete(acc.id).await.unwrap_err(), StoreError::NotFound));
        assert!(matches!(store.update(&acc).await.unwrap_err(), StoreError::NotFound));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_with_same_email_admit_one() {
        let store = MemoryAccountStore::new();
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(new_account("same@x.com", &format!("user{:03}", i)))
                    .await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StoreError::Conflict(ConflictKind::Email)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
    }
}
