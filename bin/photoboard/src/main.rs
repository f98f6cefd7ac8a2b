//! # Photoboard Binary
//!
//! The entry point that assembles the application: document store, media
//! store, credential adapters, services, and the axum surface.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use api_adapters::{router, AppState};
use auth_adapters::{Argon2PasswordHasher, JwtTokenService};
use configs::AppConfig;
use services::{AccountService, PhotoEngagementService};
use storage_adapters::{LocalMediaStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;

    // 1. Document store
    let store = Arc::new(MemoryStore::new());

    // 2. Media store
    let media = Arc::new(LocalMediaStore::new(
        PathBuf::from(&config.media.root),
        config.media.url_prefix.clone(),
    ));

    // 3. Credential adapters
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));

    // 4. Services
    let engagement = Arc::new(PhotoEngagementService::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let accounts = Arc::new(AccountService::new(store, hasher, tokens));

    // 5. HTTP surface: API routes, uploaded blobs, CORS allow-list
    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let app = router(AppState { engagement, accounts, media })
        .nest_service(
            &config.media.url_prefix,
            ServeDir::new(&config.media.root),
        )
        .layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "photoboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
