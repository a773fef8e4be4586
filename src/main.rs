//! Entry point: load config, wire dependencies, and run the server.

use accountd::config::{Config, StoreBackend};
use accountd::db::{self, AccountStore, MemoryAccountStore, PgAccountStore};
use accountd::{auth::TokenCodec, create_app, AppError, AppState};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // No signing secret, no server.
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn AccountStore> = match config.store {
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database_url).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgAccountStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory account store; accounts are lost on exit");
            Arc::new(MemoryAccountStore::new())
        }
    };
    let ttl = chrono::Duration::try_minutes(config.jwt_ttl_minutes)
        .ok_or_else(|| AppError::Config("JWT_TTL_MINUTES out of range".to_string()))?;
    let codec = TokenCodec::new(&config.jwt_secret, ttl);

    let app = create_app(AppState::new(store, codec)).layer(CorsLayer::permissive());

    tracing::info!(addr = %config.server_addr, store = ?config.store, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
