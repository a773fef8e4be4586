//! Login: email + password in, fresh token out.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::auth::{PasswordHasher, TokenCodec};
use crate::db::AccountStore;
use crate::error::{AppError, AppResult};
use crate::models::normalize_email;

use super::AuthSession;

#[derive(Clone)]
pub struct AuthenticationService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    codec: TokenCodec,
}

impl AuthenticationService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher, codec: TokenCodec) -> Self {
        Self {
            store,
            hasher,
            codec,
        }
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    /// Nothing is written.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email);

        let account = match self.store.find_by_email(&email).await? {
            Some(a) => a,
            None => {
                warn!(email = %email, "login rejected: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &account.password_hash) {
            warn!(account_id = %account.id, "login rejected: bad password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.codec.issue(&account.email, &account.joined_roles())?;
        info!(account_id = %account.id, "account logged in");
        Ok(AuthSession { account, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryAccountStore;
    use crate::services::RegistrationService;
    use chrono::Duration;

    async fn setup() -> (AuthenticationService, RegistrationService) {
        let store: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        let codec = TokenCodec::new("test-jwt-secret-min-32-chars!!!!", Duration::minutes(5));
        let hasher = PasswordHasher::new();
        (
            AuthenticationService::new(store.clone(), hasher.clone(), codec.clone()),
            RegistrationService::new(store, hasher, codec),
        )
    }

    #[tokio::test]
    async fn login_returns_same_account_and_new_token() {
        let (auth, reg) = setup().await;
        let registered = reg.register("a@x.com", "alice1", "secret1").await.unwrap();
        let session = auth.login("A@x.com", "secret1").await.unwrap();
        assert_eq!(session.account.id, registered.account.id);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let (auth, reg) = setup().await;
        reg.register("a@x.com", "alice1", "secret1").await.unwrap();

        let wrong = auth.login("a@x.com", "wrong").await.unwrap_err();
        let unknown = auth.login("nobody@x.com", "secret1").await.unwrap_err();
        assert!(matches!(wrong, AppError::InvalidCredentials));
        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }
}
