//! SQLite backups written with `VACUUM INTO`.

use std::{path::Path, time::Duration};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};

use crate::server::{
    error::AppError,
    model::backup::{backup_file_name, parse_backup_file_name, BackupFile},
};

const BACKUP_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub struct BackupService<'a> {
    db: &'a DatabaseConnection,
    backup_dir: &'a Path,
    retention_days: i64,
}

impl<'a> BackupService<'a> {
    pub fn new(db: &'a DatabaseConnection, backup_dir: &'a Path, retention_days: i64) -> Self {
        Self {
            db,
            backup_dir,
            retention_days,
        }
    }

    /// Writes a consistent copy of the database into the backup directory.
    ///
    /// # Returns
    /// - `Err(AppError::Unavailable)` - Database backend is not SQLite
    /// - `Err(AppError::Conflict)` - A backup with the same timestamp already exists
    /// - `Err(AppError::Timeout)` - Backup did not finish within 30 minutes
    pub async fn create(&self) -> Result<BackupFile, AppError> {
        if self.db.get_database_backend() != DatabaseBackend::Sqlite {
            return Err(AppError::Unavailable(
                "Backups are only supported for SQLite databases".to_string(),
            ));
        }

        tokio::fs::create_dir_all(self.backup_dir).await?;

        let name = backup_file_name(Utc::now());
        let path = self.backup_dir.join(&name);
        if tokio::fs::try_exists(&path).await? {
            return Err(AppError::conflict(format!("Backup {} already exists", name)));
        }

        let sql = format!(
            "VACUUM INTO '{}'",
            path.to_string_lossy().replace('\'', "''")
        );

        tokio::time::timeout(BACKUP_TIMEOUT, self.db.execute_unprepared(&sql))
            .await
            .map_err(|_| AppError::Timeout("Backup did not finish within 30 minutes".to_string()))??;

        let backup = read_backup(&path, &name).await?;

        tracing::info!("Created backup {} ({} bytes)", backup.name, backup.size_bytes);

        Ok(backup)
    }

    /// Backups in the backup directory, newest first. Unrelated files are ignored.
    pub async fn list(&self) -> Result<Vec<BackupFile>, AppError> {
        let mut entries = match tokio::fs::read_dir(self.backup_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut backups = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if parse_backup_file_name(&name).is_err() {
                continue;
            }

            backups.push(read_backup(&entry.path(), &name).await?);
        }
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// # Returns
    /// - `Err(AppError::Validation)` - Name does not match the backup file pattern
    /// - `Err(AppError::NotFound)` - No such backup
    pub async fn delete(&self, name: &str) -> Result<(), AppError> {
        parse_backup_file_name(name)?;

        match tokio::fs::remove_file(self.backup_dir.join(name)).await {
            Ok(()) => {
                tracing::info!("Deleted backup {}", name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(format!("backup {} not found", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes backups older than the retention period, returning how many were removed.
    pub async fn cleanup(&self) -> Result<u64, AppError> {
        self.cleanup_before(Utc::now() - ChronoDuration::days(self.retention_days))
            .await
    }

    async fn cleanup_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut removed = 0;
        for backup in self.list().await? {
            if backup.created_at >= cutoff {
                continue;
            }

            tokio::fs::remove_file(self.backup_dir.join(&backup.name)).await?;
            removed += 1;
        }

        if removed > 0 {
            tracing::info!("Removed {} expired backups", removed);
        }

        Ok(removed)
    }
}

async fn read_backup(path: &Path, name: &str) -> Result<BackupFile, AppError> {
    let metadata = tokio::fs::metadata(path).await?;

    Ok(BackupFile {
        name: name.to_string(),
        size_bytes: metadata.len(),
        created_at: parse_backup_file_name(name)?,
    })
}
