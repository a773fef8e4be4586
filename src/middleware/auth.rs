//! Bearer-token extractor resolving the acting account.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::Account;

/// Extractor: the live account behind `Authorization: Bearer <token>`.
///
/// Handlers receive the caller explicitly; nothing reads identity from
/// ambient state.
#[derive(Clone, Debug)]
pub struct Caller(pub Account);

#[axum::async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    debug!(error = %e, "rejected request: bad Authorization header");
                    AppError::Unauthenticated("Missing or invalid Authorization header".to_string())
                })?;
        let account = state.callers().resolve(bearer.token()).await?;
        Ok(Caller(account))
    }
}
