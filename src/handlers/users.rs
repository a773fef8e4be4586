//! Self-service handlers under /users/me. No handler takes a target id.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::Caller;
use crate::models::{Account, Role};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for ProfileResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            roles: a.roles,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    #[validate(length(min = 6, max = 50))]
    pub username: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(state.profiles().get_self(&caller).into()))
}

/// PUT /users/me
pub async fn update_me(
    State(state): State<AppState>,
    Caller(caller): Caller,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, AppError> {
    let Json(body) = payload?;
    body.validate()?;
    let saved = state
        .profiles()
        .update_self(&caller, &body.username, &body.password)
        .await?;
    Ok(Json(UpdateResponse {
        id: saved.id,
        email: saved.email,
        username: saved.username,
    }))
}

/// DELETE /users/me
pub async fn delete_me(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<StatusCode, AppError> {
    state.profiles().delete_self(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
