//! Media uploads: validation, object storage and metadata rows.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::media::MediaRepository,
    error::{storage::StorageError, AppError},
    model::{
        media::{CreateMediaParams, Media, UploadParams, ALLOWED_CONTENT_TYPES, MAX_UPLOAD_BYTES},
        pagination::{Paginated, Pagination},
    },
    service::storage::{storage_key, StorageClient},
};

pub struct MediaService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn StorageClient,
}

impl<'a> MediaService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn StorageClient) -> Self {
        Self { db, storage }
    }

    /// Stores an upload and records its metadata.
    ///
    /// Size and content type are checked before anything is written. If the row cannot be
    /// inserted the stored object is removed again.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Empty file
    /// - `Err(AppError::PayloadTooLarge)` - More than `MAX_UPLOAD_BYTES`
    /// - `Err(AppError::UnsupportedMediaType)` - Content type not on the allow-list
    pub async fn upload(&self, params: UploadParams) -> Result<Media, AppError> {
        if params.bytes.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if params.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MiB upload limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let content_type = normalize_content_type(&params.content_type);
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::UnsupportedMediaType(format!(
                "Content type '{}' is not allowed",
                content_type
            )));
        }

        let id = Uuid::new_v4();
        let key = storage_key(Utc::now(), id, &params.file_name, &content_type);
        self.storage.put(&key, &params.bytes).await?;

        let created = MediaRepository::new(self.db)
            .create(CreateMediaParams {
                id,
                uploaded_by: params.uploaded_by,
                file_name: params.file_name,
                storage_key: key.clone(),
                content_type,
                size_bytes: params.bytes.len() as i64,
                alt_text: params.alt_text,
            })
            .await;

        match created {
            Ok(media) => {
                tracing::info!("Stored media {} at {}", media.id, media.storage_key);
                Ok(media)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    tracing::warn!("Failed to remove orphaned object {}: {}", key, cleanup);
                }
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Media, AppError> {
        MediaRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("media {} not found", id)))
    }

    pub async fn get_paginated(
        &self,
        uploaded_by: Option<Uuid>,
        pagination: Pagination,
    ) -> Result<Paginated<Media>, AppError> {
        Ok(MediaRepository::new(self.db)
            .get_paginated(uploaded_by, pagination)
            .await?)
    }

    /// Deletes the row and the stored object. A missing object is logged, not an error.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let media = self.get(id).await?;

        MediaRepository::new(self.db).delete(id).await?;

        match self.storage.delete(&media.storage_key).await {
            Ok(()) => {}
            Err(StorageError::NotFound(key)) => {
                tracing::warn!("Stored object {} for media {} was already gone", key, id);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

/// Drops parameters such as `; charset=utf-8` and lowercases the type.
fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
