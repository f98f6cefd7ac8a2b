//! # domains
//!
//! The dependency-free heart of Photoboard: entity models, the vote state
//! machine, the trending transform, port traits, and the error taxonomy.
//! Adapters and services depend on this crate; it depends on nothing of theirs.

pub mod error;
pub mod models;
pub mod ports;
pub mod trending;
pub mod vote;

pub use error::{AppError, Result};
pub use models::{Comment, Photo, User, FLAG_HIDE_THRESHOLD};
pub use vote::{VoteAction, VoteError, VoteState};
