//! # services
//!
//! Use-case orchestration between the ports. Stateless: every call loads,
//! validates, applies, persists, returns — nothing is cached between calls.

pub mod accounts;
pub mod photos;

pub use accounts::AccountService;
pub use photos::{CommentView, PhotoDetail, PhotoEngagementService};
