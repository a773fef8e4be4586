//! Persistence interface for accounts.

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{Account, NewAccount};

/// Which unique key a write collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Email,
    Username,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Email => f.write_str("email"),
            ConflictKind::Username => f.write_str("username"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} already taken")]
    Conflict(ConflictKind),

    #[error("account not found")]
    NotFound,

    #[error("corrupt account record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Db(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Account storage. Implementations must enforce email and username
/// uniqueness atomically and report collisions as `StoreError::Conflict`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account, assigning `id` and `created_at`.
    async fn create(&self, account: NewAccount) -> StoreResult<Account>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>>;

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// Write back `username`, `password_hash` and `roles`. `email` and
    /// `created_at` are never changed.
    async fn update(&self, account: &Account) -> StoreResult<Account>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}
