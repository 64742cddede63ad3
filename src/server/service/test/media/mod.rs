use super::*;
use crate::server::{
    model::media::{UploadParams, MAX_UPLOAD_BYTES},
    service::{media::MediaService, storage::LocalStorage},
};

mod upload;

fn upload(uploaded_by: uuid::Uuid, content_type: &str, bytes: Vec<u8>) -> UploadParams {
    UploadParams {
        uploaded_by,
        file_name: "notes.txt".to_string(),
        content_type: content_type.to_string(),
        bytes,
        alt_text: None,
    }
}
