//! # MemoryStore
//!
//! In-process document store backing the repo ports. Documents live whole
//! inside dashmap shards; holding a shard's write guard across the mutation
//! closure gives each photo the per-document serialized read-modify-write
//! the engagement rules require.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use domains::ports::{CommentRepo, PhotoMutation, PhotoRepo, UserRepo};
use domains::{AppError, Comment, Photo, Result, User};

#[derive(Default)]
pub struct MemoryStore {
    photos: DashMap<Uuid, Photo>,
    comments: DashMap<Uuid, Comment>,
    users: DashMap<Uuid, User>,
    /// Secondary index enforcing email uniqueness atomically on insert
    emails: DashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotoRepo for MemoryStore {
    async fn insert(&self, photo: Photo) -> Result<()> {
        self.photos.insert(photo.id, photo);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Photo>> {
        Ok(self.photos.get(&id).map(|p| p.clone()))
    }

    async fn list(&self) -> Result<Vec<Photo>> {
        let mut photos: Vec<Photo> = self.photos.iter().map(|p| p.clone()).collect();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    /// The mutation runs against a draft; the stored document is replaced
    /// only when the mutation succeeds, so a rejected transition leaves no
    /// partial update behind. The entry guard is held throughout, which
    /// serializes concurrent updates on the same photo id.
    async fn update(&self, id: Uuid, mutation: PhotoMutation) -> Result<Photo> {
        let mut entry = self
            .photos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("photo".into(), id.to_string()))?;
        let mut draft = entry.clone();
        mutation(&mut draft)?;
        *entry = draft.clone();
        Ok(draft)
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn insert(&self, comment: Comment) -> Result<()> {
        self.comments.insert(comment.id, comment);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.clone()))
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert(&self, user: User) -> Result<()> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "email {} is already registered",
                user.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user);
                Ok(())
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        UserRepo::get(self, id).await
    }
}
