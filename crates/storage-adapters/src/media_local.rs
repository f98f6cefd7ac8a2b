//! # LocalMediaStore
//!
//! Local filesystem implementation of `MediaStorage`.
//! Content-addressable storage with directory sharding: the SHA-256 of the
//! bytes names the file, so re-uploading identical bytes deduplicates.

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use domains::ports::MediaStorage;
use domains::{AppError, Result};

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g., "./data/uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/api/uploads")
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self { root_path: root, url_prefix }
    }

    /// Sharded relative locator: "ab/cd/<hash>.<ext>"
    fn locator_for(hash: &str, content_type: &Mime) -> String {
        let ext = mime_guess::get_mime_extensions(content_type)
            .and_then(|exts| exts.first())
            .copied()
            .unwrap_or("bin");
        format!("{}/{}/{}.{}", &hash[0..2], &hash[2..4], hash, ext)
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStore {
    /// Saves an upload under its SHA-256 hash and returns the locator.
    async fn save(&self, data: Bytes, content_type: &Mime) -> Result<String> {
        if data.is_empty() {
            return Err(AppError::ValidationError("image payload is empty".into()));
        }

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let hash = hex::encode(hasher.finalize());
        let locator = Self::locator_for(&hash, content_type);

        let target_path = self.root_path.join(&locator);
        let parent = target_path
            .parent()
            .ok_or_else(|| AppError::Internal("media path has no parent".into()))?;
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::Internal(format!("creating media dir: {e}")))?;

        // Skip the write when the blob already exists; same bytes, same name.
        let exists = fs::try_exists(&target_path)
            .await
            .map_err(|e| AppError::Internal(format!("probing media path: {e}")))?;
        if !exists {
            fs::write(&target_path, &data)
                .await
                .map_err(|e| AppError::Internal(format!("writing media blob: {e}")))?;
            debug!(%locator, bytes = data.len(), "stored media blob");
        }

        Ok(locator)
    }

    fn url(&self, locator: &str) -> String {
        format!("{}/{}", self.url_prefix, locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (LocalMediaStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("photoboard-media-{}", uuid::Uuid::new_v4()));
        (
            LocalMediaStore::new(dir.clone(), "/api/uploads".into()),
            dir,
        )
    }

    #[tokio::test]
    async fn save_is_content_addressed_and_idempotent() {
        let (store, dir) = temp_store();
        let data = Bytes::from_static(b"not really a jpeg");

        let first = store.save(data.clone(), &mime::IMAGE_JPEG).await.unwrap();
        let second = store.save(data, &mime::IMAGE_JPEG).await.unwrap();
        assert_eq!(first, second);
        assert!(dir.join(&first).exists());

        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let (store, dir) = temp_store();
        let err = store.save(Bytes::new(), &mime::IMAGE_PNG).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn url_joins_prefix_and_locator() {
        let (store, _dir) = temp_store();
        assert_eq!(store.url("ab/cd/abcd.jpg"), "/api/uploads/ab/cd/abcd.jpg");
    }
}
