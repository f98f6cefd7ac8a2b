//! # AppError
//!
//! Centralized error handling for the Photoboard ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

use crate::vote::VoteError;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Photo, Comment, User)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., missing photo name, empty image payload)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Security/Auth failure (e.g., missing token, bad credentials)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists or the requested state change contradicts
    /// current state (e.g., duplicate email, conflicting vote)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Vote action string outside the recognized vocabulary
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// Infrastructure failure (e.g., blob store I/O, token signing)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<VoteError> for AppError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::InvalidAction(action) => AppError::InvalidAction(action),
            other => AppError::Conflict(other.to_string()),
        }
    }
}

/// A specialized Result type for Photoboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
