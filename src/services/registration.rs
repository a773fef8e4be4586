//! Onboarding: uniqueness checks, password hashing, persistence, first token.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::auth::{PasswordHasher, TokenCodec};
use crate::db::AccountStore;
use crate::error::{AppError, AppResult};
use crate::models::{normalize_email, NewAccount};

use super::AuthSession;

#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    codec: TokenCodec,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher, codec: TokenCodec) -> Self {
        Self {
            store,
            hasher,
            codec,
        }
    }

    /// Create an account with roles `{USER}` and issue its first token.
    ///
    /// The existence checks give the common case a clean error; a concurrent
    /// create that slips past them is still caught by the store's unique keys
    /// and surfaces as the same `EmailTaken` / `UsernameTaken`.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> AppResult<AuthSession> {
        let email = normalize_email(email);

        if self.store.exists_by_email(&email).await? {
            warn!(email = %email, "registration rejected: email taken");
            return Err(AppError::EmailTaken);
        }
        if self.store.exists_by_username(username).await? {
            warn!(username = %username, "registration rejected: username taken");
            return Err(AppError::UsernameTaken);
        }

        let password_hash = self.hasher.hash(password)?;
        let account = self
            .store
            .create(NewAccount::new(email, username.to_string(), password_hash))
            .await?;

        let token = self.codec.issue(&account.email, &account.joined_roles())?;
        info!(account_id = %account.id, email = %account.email, "account registered");
        Ok(AuthSession { account, token })
    }
}
