//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenCodec};
use crate::db::AccountStore;
use crate::services::{AuthenticationService, CallerResolver, ProfileService, RegistrationService};

/// Shared application state: the core services over one store and one codec.
#[derive(Clone)]
pub struct AppState {
    registration: RegistrationService,
    authentication: AuthenticationService,
    callers: CallerResolver,
    profiles: ProfileService,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>, codec: TokenCodec) -> Self {
        let hasher = PasswordHasher::new();
        Self {
            registration: RegistrationService::new(store.clone(), hasher.clone(), codec.clone()),
            authentication: AuthenticationService::new(store.clone(), hasher.clone(), codec.clone()),
            callers: CallerResolver::new(store.clone(), codec),
            profiles: ProfileService::new(store, hasher),
        }
    }

    pub fn registration(&self) -> &RegistrationService {
        &self.registration
    }
    pub fn authentication(&self) -> &AuthenticationService {
        &self.authentication
    }
    pub fn callers(&self) -> &CallerResolver {
        &self.callers
    }
    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }
}

/// GET /health: liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "accountd" })),
    )
}
