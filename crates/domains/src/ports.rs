//! # Core Ports
//!
//! Contracts between the domain and its external collaborators. Any adapter
//! must implement these traits to be wired into the binary. Mock
//! implementations are generated by mockall when the `testing` feature is on.

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, Photo, User};

/// Closure applied inside a single atomic read-modify-write on one photo
/// document. Returning an error aborts the update wholesale: no partial
/// counter/membership change may survive a rejected transition.
pub type PhotoMutation = Box<dyn FnOnce(&mut Photo) -> Result<()> + Send>;

/// Persistence contract for photo documents.
///
/// The store must provide per-document atomicity: `update` serializes the
/// read-check-write sequence against concurrent callers on the same id.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PhotoRepo: Send + Sync {
    async fn insert(&self, photo: Photo) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Photo>>;
    /// All photos, newest first. Visibility filtering is the caller's job.
    async fn list(&self) -> Result<Vec<Photo>>;
    /// Atomic read-modify-write; returns the updated document.
    /// Fails with NotFound when the id does not resolve.
    async fn update(&self, id: Uuid, mutation: PhotoMutation) -> Result<Photo>;
}

/// Persistence contract for comment documents.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Comment>>;
}

/// Persistence contract for user accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Fails with Conflict when the email is already registered.
    async fn insert(&self, user: User) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Blob storage contract for uploaded images.
///
/// The store is content-addressable by filename: saving the same bytes
/// twice yields the same locator.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Saves raw bytes and returns a locator for the Photo model.
    async fn save(&self, data: Bytes, content_type: &Mime) -> Result<String>;
    /// Public URL or path for a stored locator.
    fn url(&self, locator: &str) -> String;
}

/// One-way password hashing contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Bearer-credential contract: issues a signed credential for a user id and
/// resolves one back, failing with Unauthorized on anything invalid or
/// expired.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: Uuid) -> Result<String>;
    fn resolve(&self, token: &str) -> Result<Uuid>;
}
