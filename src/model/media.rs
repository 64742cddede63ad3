use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub id: Uuid,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Multipart form accepted by the upload endpoint. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub alt_text: Option<String>,
}
