//! Account registration, login and bearer-token identity service.
//!
//! Issues signed identity tokens for registered accounts and resolves
//! presented tokens to the live account for self-service operations.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::{http, users};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the API router (auth, self-service, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let user_routes = axum::Router::new().route(
        "/me",
        get(users::get_me)
            .put(users::update_me)
            .delete(users::delete_me),
    );

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
