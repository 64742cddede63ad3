//! Database backup file models.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::{model::backup::BackupDto, server::error::AppError};

const PREFIX: &str = "backup-";
const EXTENSION: &str = ".db";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// A backup file in the backup directory.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupFile {
    pub name: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl BackupFile {
    pub fn into_dto(self) -> BackupDto {
        BackupDto {
            name: self.name,
            size_bytes: self.size_bytes,
            created_at: self.created_at,
        }
    }
}

/// File name for a backup taken at `at`, `backup-YYYYMMDD-HHMMSS.db`.
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!("{}{}{}", PREFIX, at.format(TIMESTAMP_FORMAT), EXTENSION)
}

/// Extracts the timestamp from a backup file name.
///
/// # Returns
/// - `Err(AppError::Validation)` - Name does not match the backup file pattern
pub fn parse_backup_file_name(name: &str) -> Result<DateTime<Utc>, AppError> {
    let invalid = || AppError::validation(format!("Invalid backup name '{}'", name));

    let stamp = name
        .strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_suffix(EXTENSION))
        .ok_or_else(invalid)?;

    let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|_| invalid())?;

    Ok(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_round_trips_to_the_second() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 4, 5, 6).unwrap();
        let name = backup_file_name(at);

        assert_eq!(name, "backup-20260309-040506.db");
        assert_eq!(parse_backup_file_name(&name).unwrap(), at);
    }

    #[test]
    fn rejects_names_outside_the_pattern() {
        for name in ["../etc/passwd", "backup-2026.db", "backup-20260309-040506.sql", "notes.txt"] {
            assert!(parse_backup_file_name(name).is_err(), "{} accepted", name);
        }
    }
}
