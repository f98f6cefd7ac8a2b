//! # configs
//!
//! Layered application configuration: `Photoboard.toml` (optional) under
//! built-in defaults, overridden by `PHOTOBOARD_`-prefixed environment
//! variables (`PHOTOBOARD_SERVER__PORT=9000` style). Secrets stay wrapped
//! in `secrecy` so they never hit logs through Debug.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer (exact matches)
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    /// Token lifetime in seconds (default one hour)
    pub token_ttl_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Root directory for stored blobs
    pub root: String,
    /// Public URL prefix the blobs are served under
    pub url_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
}

impl AppConfig {
    /// Loads defaults, then `Photoboard.toml` when present, then env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default(
                "server.allowed_origins",
                vec!["http://localhost:3000", "http://localhost:5173"],
            )?
            .set_default("auth.jwt_secret", "change-me-in-production")?
            .set_default("auth.token_ttl_secs", 3600)?
            .set_default("media.root", "./data/uploads")?
            .set_default("media.url_prefix", "/api/uploads")?
            .add_source(File::with_name("Photoboard").required(false))
            .add_source(Environment::with_prefix("PHOTOBOARD").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
