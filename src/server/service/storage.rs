//! Object storage for uploaded media.
//!
//! `StorageClient` is the seam between the media service and wherever bytes end up. The
//! only implementation writes to a local directory; keys are relative paths beneath it.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::server::error::storage::StorageError;

const PROBE_FILE: &str = ".probe";

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
    /// Verifies the backend is reachable and writable.
    async fn probe(&self) -> Result<(), StorageError>;
}

pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a key to a path under the root, rejecting anything that could escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl StorageClient for LocalStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, bytes).await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn probe(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.root.join(PROBE_FILE);
        tokio::fs::write(&path, b"ok").await?;
        tokio::fs::remove_file(&path).await?;

        Ok(())
    }
}

/// Builds the key `YYYY/MM/<id>.<ext>` for an upload.
///
/// The extension comes from the original file name when it is short and alphanumeric,
/// otherwise from the content type.
pub fn storage_key(now: DateTime<Utc>, id: Uuid, file_name: &str, content_type: &str) -> String {
    let from_name = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    let ext = from_name.unwrap_or_else(|| extension_for(content_type).to_string());

    format!("{:04}/{:02}/{}.{}", now.year(), now.month(), id, ext)
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "application/pdf" => "pdf",
        "video/mp4" => "mp4",
        "audio/mpeg" => "mp3",
        "text/plain" => "txt",
        _ => "bin",
    }
}
