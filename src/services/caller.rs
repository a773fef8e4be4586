//! Resolve a presented bearer token to the live account behind it.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::auth::TokenCodec;
use crate::db::AccountStore;
use crate::error::{AppError, AppResult};
use crate::models::Account;

#[derive(Clone)]
pub struct CallerResolver {
    store: Arc<dyn AccountStore>,
    codec: TokenCodec,
}

impl CallerResolver {
    pub fn new(store: Arc<dyn AccountStore>, codec: TokenCodec) -> Self {
        Self { store, codec }
    }

    /// The token's role claim is ignored here: the returned record carries
    /// the account's current roles.
    #[instrument(skip(self, token))]
    pub async fn resolve(&self, token: &str) -> AppResult<Account> {
        let claims = self.codec.verify(token)?;
        match self.store.find_by_email(&claims.sub).await? {
            Some(account) => Ok(account),
            None => {
                debug!(subject = %claims.sub, "token subject has no account");
                Err(AppError::Unauthenticated(
                    "account no longer exists".to_string(),
                ))
            }
        }
    }
}
