use uuid::Uuid;

use crate::server::error::AppError;

/// Parses a UUID received as a path or query string.
///
/// # Arguments
/// - `value` - The raw string to parse
///
/// # Returns
/// - `Ok(Uuid)` - Successfully parsed identifier
/// - `Err(AppError::Validation)` - The string is not a well-formed UUID
pub fn parse_uuid(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::validation(format!("Invalid id '{}': expected a UUID", value)))
}

/// Parses an optional UUID query parameter, treating an empty string as absent.
pub fn parse_optional_uuid(value: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_uuid(value).map(Some),
    }
}
