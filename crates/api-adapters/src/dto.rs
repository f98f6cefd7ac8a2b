//! Request and response bodies. The wire format is camelCase JSON; errors
//! are always `{"message": ...}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::Photo;
use services::{CommentView, PhotoDetail};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Image bytes, base64-encoded by the client
    pub image_base64: String,
    /// MIME tag of the payload (e.g., "image/jpeg")
    pub content_type: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// like | removeLike | dislike | removeDislike — validated downstream
    /// so unknown strings surface as InvalidAction, not a parse failure
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    /// "hot" for trending order; anything else lists newest first
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn hot(&self) -> bool {
        self.sort.as_deref() == Some("hot")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
    pub content_type: String,
    pub posted_by: Uuid,
    pub likes: u32,
    pub dislikes: u32,
    pub likes_by: Vec<Uuid>,
    pub dislikes_by: Vec<Uuid>,
    pub flags: u32,
    pub hidden: bool,
    pub comment_count: usize,
    pub created_at: DateTime<Utc>,
}

impl PhotoResponse {
    /// `resolve_url` maps the stored blob locator to its public URL.
    pub fn from_photo(photo: Photo, resolve_url: impl Fn(&str) -> String) -> Self {
        Self {
            id: photo.id,
            name: photo.name,
            description: photo.description,
            image_url: resolve_url(&photo.image),
            content_type: photo.content_type,
            posted_by: photo.posted_by,
            likes: photo.likes,
            dislikes: photo.dislikes,
            likes_by: photo.likes_by,
            dislikes_by: photo.dislikes_by,
            flags: photo.flags,
            hidden: photo.hidden,
            comment_count: photo.comments.len(),
            created_at: photo.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub posted_by: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.id,
            text: view.text,
            posted_by: view.posted_by,
            username: view.username,
            created_at: view.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PhotoDetailResponse {
    #[serde(flatten)]
    pub photo: PhotoResponse,
    pub comments: Vec<CommentResponse>,
}

impl PhotoDetailResponse {
    pub fn from_detail(detail: PhotoDetail, resolve_url: impl Fn(&str) -> String) -> Self {
        let comments = detail.comments.into_iter().map(Into::into).collect();
        let photo = PhotoResponse::from_photo(detail.photo, resolve_url);
        Self { photo, comments }
    }
}
