//! # PhotoEngagementService
//!
//! Owns the lifecycle of a photo's engagement state: publish, votes,
//! moderation flags, comments, and the trending read path. All state lives
//! in the repositories; the service only coordinates the transitions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use domains::ports::{CommentRepo, PhotoRepo, UserRepo};
use domains::{trending, AppError, Comment, Photo, Result, VoteAction};

/// A comment joined with its author's display name. Read-side only; the
/// username is never denormalized into the stored document.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub posted_by: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A photo with its comments resolved for display, insertion order kept.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoDetail {
    #[serde(flatten)]
    pub photo: Photo,
    pub comments: Vec<CommentView>,
}

pub struct PhotoEngagementService {
    photos: Arc<dyn PhotoRepo>,
    comments: Arc<dyn CommentRepo>,
    users: Arc<dyn UserRepo>,
}

impl PhotoEngagementService {
    pub fn new(
        photos: Arc<dyn PhotoRepo>,
        comments: Arc<dyn CommentRepo>,
        users: Arc<dyn UserRepo>,
    ) -> Self {
        Self { photos, comments, users }
    }

    /// Publishes a new photo. The image blob must already be stored; this
    /// records its locator with zeroed engagement state.
    #[instrument(skip(self, description))]
    pub async fn publish(
        &self,
        owner: Uuid,
        name: &str,
        description: Option<String>,
        image: &str,
        content_type: &str,
    ) -> Result<Photo> {
        let photo = Photo::publish(owner, name, description, image, content_type)?;
        self.photos.insert(photo.clone()).await?;
        debug!(photo_id = %photo.id, "photo published");
        Ok(photo)
    }

    /// Lists visible photos. Base order is creation descending; with
    /// `hot` the trending score is recomputed for this call and applied
    /// as a stable re-sort. Hidden photos never appear under either
    /// ordering.
    pub async fn list(&self, hot: bool) -> Result<Vec<Photo>> {
        let mut photos: Vec<Photo> = self
            .photos
            .list()
            .await?
            .into_iter()
            .filter(|p| !p.hidden)
            .collect();
        if hot {
            trending::rank(&mut photos, Utc::now());
        }
        Ok(photos)
    }

    /// Fetches one photo with its comments joined to commenter display
    /// names.
    pub async fn get(&self, id: Uuid) -> Result<PhotoDetail> {
        let photo = self
            .photos
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("photo".into(), id.to_string()))?;
        let comments = self.join_comments(&photo).await?;
        Ok(PhotoDetail { photo, comments })
    }

    /// Applies one vote transition for `user` as a single atomic
    /// read-modify-write. Rejections per the transition table surface as
    /// Conflict/InvalidAction and leave the photo untouched.
    #[instrument(skip(self))]
    pub async fn vote(&self, photo_id: Uuid, user: Uuid, action: &str) -> Result<Photo> {
        let action: VoteAction = action.parse().map_err(AppError::from)?;
        let updated = self
            .photos
            .update(
                photo_id,
                Box::new(move |photo| photo.apply_vote(user, action).map_err(AppError::from)),
            )
            .await?;
        debug!(photo_id = %photo_id, %action, likes = updated.likes, dislikes = updated.dislikes, "vote applied");
        Ok(updated)
    }

    /// Appends a comment. Two sequential writes with no cross-document
    /// atomicity: the comment document first, then the photo's list. The
    /// photo list is the sole source of listing truth, so a comment left
    /// unlinked by a failure between the writes is invisible to readers.
    #[instrument(skip(self, text))]
    pub async fn add_comment(&self, photo_id: Uuid, user: Uuid, text: &str) -> Result<CommentView> {
        // Resolve the photo up front so a bad id creates no comment at all.
        if self.photos.get(photo_id).await?.is_none() {
            return Err(AppError::NotFound("photo".into(), photo_id.to_string()));
        }

        let comment = Comment::new(photo_id, user, text)?;
        self.comments.insert(comment.clone()).await?;

        let comment_id = comment.id;
        self.photos
            .update(photo_id, Box::new(move |photo| {
                photo.link_comment(comment_id);
                Ok(())
            }))
            .await?;

        let username = self.display_name(user).await?;
        Ok(CommentView {
            id: comment.id,
            text: comment.text,
            posted_by: comment.posted_by,
            username,
            created_at: comment.created_at,
        })
    }

    /// Records one moderation flag, unconditionally. No per-user dedup:
    /// repeat calls by the same user all count (kept as the product
    /// currently behaves). The third flag hides the photo for good.
    #[instrument(skip(self))]
    pub async fn flag(&self, photo_id: Uuid) -> Result<Photo> {
        let updated = self
            .photos
            .update(photo_id, Box::new(|photo| {
                photo.register_flag();
                Ok(())
            }))
            .await?;
        if updated.hidden {
            debug!(photo_id = %photo_id, flags = updated.flags, "photo hidden by moderation flags");
        }
        Ok(updated)
    }

    async fn display_name(&self, user_id: Uuid) -> Result<String> {
        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user".into(), user_id.to_string()))?;
        Ok(user.username)
    }

    async fn join_comments(&self, photo: &Photo) -> Result<Vec<CommentView>> {
        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut views = Vec::with_capacity(photo.comments.len());
        for comment_id in &photo.comments {
            let Some(comment) = self.comments.get(*comment_id).await? else {
                // Linked but missing comment document: store-level damage,
                // skip rather than fail the whole read.
                warn!(comment_id = %comment_id, photo_id = %photo.id, "linked comment missing from store");
                continue;
            };
            let username = match names.get(&comment.posted_by) {
                Some(name) => name.clone(),
                None => {
                    let name = self.display_name(comment.posted_by).await?;
                    names.insert(comment.posted_by, name.clone());
                    name
                }
            };
            views.push(CommentView {
                id: comment.id,
                text: comment.text,
                posted_by: comment.posted_by,
                username,
                created_at: comment.created_at,
            });
        }
        Ok(views)
    }
}
