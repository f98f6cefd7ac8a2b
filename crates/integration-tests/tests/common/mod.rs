//! Shared fixtures: a full service stack over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use domains::{Photo, User};
use services::PhotoEngagementService;
use storage_adapters::MemoryStore;
use uuid::Uuid;

pub struct Stack {
    pub store: Arc<MemoryStore>,
    pub engagement: PhotoEngagementService,
}

pub fn stack() -> Stack {
    let store = Arc::new(MemoryStore::new());
    let engagement =
        PhotoEngagementService::new(store.clone(), store.clone(), store.clone());
    Stack { store, engagement }
}

/// Registers a user directly in the store, bypassing password hashing.
pub async fn seed_user(store: &Arc<MemoryStore>, username: &str) -> Uuid {
    use domains::ports::UserRepo;
    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "x".into(),
    };
    let id = user.id;
    UserRepo::insert(store.as_ref(), user).await.unwrap();
    id
}

pub async fn publish_photo(stack: &Stack, owner: Uuid, name: &str) -> Photo {
    stack
        .engagement
        .publish(owner, name, None, "blob-locator", "image/jpeg")
        .await
        .unwrap()
}

#[cfg(feature = "web-axum")]
pub mod web {
    use super::*;
    use api_adapters::{router, AppState};
    use auth_adapters::{Argon2PasswordHasher, JwtTokenService};
    use axum::Router;
    use secrecy::SecretString;
    use services::AccountService;
    use std::path::PathBuf;
    use storage_adapters::LocalMediaStore;

    pub fn app() -> Router {
        let store = Arc::new(MemoryStore::new());
        let media_root =
            std::env::temp_dir().join(format!("photoboard-it-{}", Uuid::new_v4()));
        let media = Arc::new(LocalMediaStore::new(
            PathBuf::from(media_root),
            "/api/uploads".into(),
        ));
        let engagement = Arc::new(PhotoEngagementService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        let accounts = Arc::new(AccountService::new(
            store,
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenService::new(
                &SecretString::from("it-secret".to_string()),
                3600,
            )),
        ));
        router(AppState { engagement, accounts, media })
    }
}

/// Asserts the counter/membership invariants the engagement rules promise.
pub fn assert_engagement_consistent(photo: &Photo) {
    assert_eq!(photo.likes as usize, photo.likes_by.len());
    assert_eq!(photo.dislikes as usize, photo.dislikes_by.len());
    assert!(
        !photo.likes_by.iter().any(|u| photo.dislikes_by.contains(u)),
        "likes_by and dislikes_by overlap"
    );
}
