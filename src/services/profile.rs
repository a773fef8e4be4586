//! Self-service read, update and delete. The target is always the resolved caller.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::auth::PasswordHasher;
use crate::db::AccountStore;
use crate::error::{AppError, AppResult};
use crate::models::Account;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl ProfileService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn get_self(&self, caller: &Account) -> Account {
        caller.clone()
    }

    /// Both fields are required; the password is always re-hashed.
    #[instrument(skip(self, caller, new_password), fields(account_id = %caller.id))]
    pub async fn update_self(
        &self,
        caller: &Account,
        new_username: &str,
        new_password: &str,
    ) -> AppResult<Account> {
        if caller.username != new_username && self.store.exists_by_username(new_username).await? {
            warn!(username = %new_username, "update rejected: username taken");
            return Err(AppError::UsernameTaken);
        }

        let mut updated = caller.clone();
        updated.username = new_username.to_string();
        updated.password_hash = self.hasher.hash(new_password)?;

        let saved = self.store.update(&updated).await?;
        info!("account updated");
        Ok(saved)
    }

    #[instrument(skip(self, caller), fields(account_id = %caller.id))]
    pub async fn delete_self(&self, caller: &Account) -> AppResult<()> {
        self.store.delete(caller.id).await?;
        info!("account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryAccountStore;
    use crate::models::NewAccount;

    async fn seed(store: &MemoryAccountStore, email: &str, username: &str) -> Account {
        let hash = PasswordHasher::new().hash("secret1").unwrap();
        store
            .create(NewAccount::new(email.into(), username.into(), hash))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn update_changes_username_and_password() {
        let store = MemoryAccountStore::new();
        let alice = seed(&store, "a@x.com", "alice1").await;
        let svc = ProfileService::new(Arc::new(store.clone()), PasswordHasher::new());

        let saved = svc.update_self(&alice, "alice2", "secret2").await.unwrap();
        assert_eq!(saved.id, alice.id);
        assert_eq!(saved.email, "a@x.com");
        assert_eq!(saved.username, "alice2");
        assert_eq!(saved.created_at, alice.created_at);

        let hasher = PasswordHasher::new();
        assert!(hasher.verify("secret2", &saved.password_hash));
        assert!(!hasher.verify("secret1", &saved.password_hash));
    }

    #[tokio::test]
    async fn keeping_own_username_is_allowed() {
        let store = MemoryAccountStore::new();
        let alice = seed(&store, "a@x.com", "alice1").await;
        let svc = ProfileService::new(Arc::new(store), PasswordHasher::new());
        let saved = tokio_test::assert_ok!(svc.update_self(&alice, "alice1", "secret9").await);
        assert_eq!(saved.username, "alice1");
    }

    #[tokio::test]
    async fn taking_someone_elses_username_fails() {
        let store = MemoryAccountStore::new();
        let alice = seed(&store, "a@x.com", "alice1").await;
        seed(&store, "b@x.com", "bobby1").await;
        let svc = ProfileService::new(Arc::new(store), PasswordHasher::new());
        let err = svc.update_self(&alice, "bobby1", "secret2").await.unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn delete_removes_only_the_caller() {
        let store = MemoryAccountStore::new();
        let alice = seed(&store, "a@x.com", "alice1").await;
        let bob = seed(&store, "b@x.com", "bobby1").await;
        let svc = ProfileService::new(Arc::new(store.clone()), PasswordHasher::new());

        svc.delete_self(&alice).await.unwrap();
        assert!(store.find_by_id(alice.id).await.unwrap().is_none());
        assert!(store.find_by_id(bob.id).await.unwrap().is_some());

        // record vanished between resolution and the write
        let err = svc.delete_self(&alice).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = svc.update_self(&alice, "alice3", "secret3").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
