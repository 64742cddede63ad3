use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope wrapping every successful JSON response.
///
/// `pagination` is only emitted by list endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationDto>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    /// Error envelope that still carries a payload, e.g. a failing health report.
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "error",
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn paginated(message: impl Into<String>, data: T, pagination: PaginationDto) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
            pagination: Some(pagination),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with `data: null`, used by deletes and other bodiless operations.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

/// Error body. Shares the envelope shape of [`ApiResponse`] with `status: "error"`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl ErrorDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginationDto {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Page-numbered pagination used by search results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageDto {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}
