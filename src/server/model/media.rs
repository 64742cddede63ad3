//! Media domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::media::MediaDto;

/// Upload size limit in bytes (50 MiB).
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Content types accepted by the upload endpoint.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "application/pdf",
    "video/mp4",
    "audio/mpeg",
    "text/plain",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: Uuid,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Media {
    pub fn from_entity(entity: entity::media::Model) -> Self {
        Self {
            id: entity.id,
            uploaded_by: entity.uploaded_by,
            file_name: entity.file_name,
            storage_key: entity.storage_key,
            content_type: entity.content_type,
            size_bytes: entity.size_bytes,
            alt_text: entity.alt_text,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> MediaDto {
        MediaDto {
            id: self.id,
            uploaded_by: self.uploaded_by,
            file_name: self.file_name,
            storage_key: self.storage_key,
            content_type: self.content_type,
            size_bytes: self.size_bytes,
            alt_text: self.alt_text,
            created_at: self.created_at,
        }
    }
}

/// A received upload, before it is stored.
#[derive(Debug, Clone)]
pub struct UploadParams {
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub alt_text: Option<String>,
}

/// Row data for a stored upload.
#[derive(Debug, Clone)]
pub struct CreateMediaParams {
    pub id: Uuid,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub alt_text: Option<String>,
}
