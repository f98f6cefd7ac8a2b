//! # Domain Models
//!
//! These structs represent the core entities of Photoboard.
//! Each document carries its own id; the document store persists them whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Number of moderation flags at which a photo stops being listed.
pub const FLAG_HIDE_THRESHOLD: u32 = 3;

/// A published photo together with its engagement state.
///
/// The two membership vectors carry set semantics (no duplicates) and are
/// kept disjoint; `likes`/`dislikes` mirror their cardinality at all times.
/// The three-valued vote relationship between a user and a photo is never
/// stored — it is derived from membership via [`crate::vote::VoteState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Locator of the image blob held by the external media store
    pub image: String,
    /// MIME tag of the stored blob (e.g., "image/jpeg")
    pub content_type: String,
    /// Owner; immutable after creation
    pub posted_by: Uuid,
    pub likes: u32,
    pub dislikes: u32,
    pub likes_by: Vec<Uuid>,
    pub dislikes_by: Vec<Uuid>,
    pub flags: u32,
    /// Set once flags reaches [`FLAG_HIDE_THRESHOLD`]; never reverts
    pub hidden: bool,
    /// Comment ids in insertion order = display order.
    /// This list is the sole source of listing truth: a Comment document
    /// not referenced here is invisible to readers.
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Creates a photo at the publish boundary.
    ///
    /// The image blob must already be durably stored by the media
    /// collaborator; this only records its locator. Fails with
    /// `ValidationError` when the name or the locator is missing.
    pub fn publish(
        posted_by: Uuid,
        name: &str,
        description: Option<String>,
        image: &str,
        content_type: &str,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError("photo name is required".into()));
        }
        if image.is_empty() {
            return Err(AppError::ValidationError("image reference is required".into()));
        }
        if content_type.is_empty() {
            return Err(AppError::ValidationError("content type is required".into()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description,
            image: image.to_string(),
            content_type: content_type.to_string(),
            posted_by,
            likes: 0,
            dislikes: 0,
            likes_by: Vec::new(),
            dislikes_by: Vec::new(),
            flags: 0,
            hidden: false,
            comments: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Records one moderation flag.
    ///
    /// Flags are not deduplicated per user (a documented asymmetry with
    /// votes, kept until product decides otherwise). Crossing the
    /// threshold hides the photo; the transition is monotonic.
    pub fn register_flag(&mut self) {
        self.flags += 1;
        if self.flags >= FLAG_HIDE_THRESHOLD {
            self.hidden = true;
        }
    }

    /// Appends a comment reference, preserving insertion order.
    pub fn link_comment(&mut self, comment_id: Uuid) {
        self.comments.push(comment_id);
    }
}

/// A single immutable comment on a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub posted_by: Uuid,
    /// Back-reference for fetch purposes; the photo's list owns membership
    pub photo: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Fails with `ValidationError` when the text is empty.
    pub fn new(photo: Uuid, posted_by: Uuid, text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(AppError::ValidationError("comment text is required".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            posted_by,
            photo,
            created_at: Utc::now(),
        })
    }
}

/// A registered account. The password exists only as a one-way hash,
/// and even that never leaves the process in a serialized document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
