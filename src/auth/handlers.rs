//! Auth HTTP handlers: register, login.

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
use crate::models::Role;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 50))]
    pub username: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub roles: BTreeSet<Role>,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub token: String,
    pub email: String,
    pub username: String,
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(body) = payload?;
    body.validate()?;

    let session = state
        .registration()
        .register(&body.email, &body.username, &body.password)
        .await?;
    let account = session.account;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: account.id,
            email: account.email,
            username: account.username,
            created_at: account.created_at,
            roles: account.roles,
            token: session.token,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(body) = payload?;
    body.validate()?;

    let session = state
        .authentication()
        .login(&body.email, &body.password)
        .await?;
    let account = session.account;

    Ok(Json(LoginResponse {
        id: account.id,
        token: session.token,
        email: account.email,
        username: account.username,
        roles: account.roles,
        created_at: account.created_at,
    }))
}
