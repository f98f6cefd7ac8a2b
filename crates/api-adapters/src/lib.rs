//! # api-adapters
//!
//! The HTTP surface over the services layer. DTOs are always available;
//! the axum router, handlers, and extractors compile behind the `web-axum`
//! feature so non-web deployments skip the dependency entirely.

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;

#[cfg(feature = "web-axum")]
pub use handlers::{router, AppState};
