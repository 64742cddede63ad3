//! Background job domain models.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::job::{EnqueueJobDto, JobDto},
    server::error::AppError,
};

pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        Self::Pending,
        Self::Running,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid job status '{}'", s)))
    }
}

/// Job types the worker knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    BackupCreate,
    BackupCleanup,
    NotificationsPurge,
}

impl JobKind {
    pub const ALL: [JobKind; 3] = [
        Self::BackupCreate,
        Self::BackupCleanup,
        Self::NotificationsPurge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackupCreate => "backup.create",
            Self::BackupCleanup => "backup.cleanup",
            Self::NotificationsPurge => "notifications.purge",
        }
    }
}

impl FromStr for JobKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown job type '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: Uuid,
    pub job_type: String,
    pub payload: serde_json::Value,
    pub status: JobStatus,
    pub attempts: i32,
    pub max_attempts: i32,
    pub last_error: Option<String>,
    pub run_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn from_entity(entity: entity::job::Model) -> Result<Self, DbErr> {
        let status = entity
            .status
            .parse::<JobStatus>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse job status: {}", e)))?;

        Ok(Self {
            id: entity.id,
            job_type: entity.job_type,
            payload: entity.payload,
            status,
            attempts: entity.attempts,
            max_attempts: entity.max_attempts,
            last_error: entity.last_error,
            run_at: entity.run_at,
            started_at: entity.started_at,
            finished_at: entity.finished_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> JobDto {
        JobDto {
            id: self.id,
            job_type: self.job_type,
            payload: self.payload,
            status: self.status.to_string(),
            attempts: self.attempts,
            max_attempts: self.max_attempts,
            last_error: self.last_error,
            run_at: self.run_at,
            started_at: self.started_at,
            finished_at: self.finished_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnqueueJobParams {
    pub kind: JobKind,
    pub payload: serde_json::Value,
    pub run_at: DateTime<Utc>,
    pub max_attempts: i32,
}

impl EnqueueJobParams {
    pub fn new(kind: JobKind) -> Self {
        Self {
            kind,
            payload: serde_json::Value::Null,
            run_at: Utc::now(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// # Returns
    /// - `Err(AppError::Validation)` - Unknown job type or `max_attempts` below 1
    pub fn from_dto(dto: EnqueueJobDto) -> Result<Self, AppError> {
        let kind = dto.job_type.trim().parse()?;
        let max_attempts = dto.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts < 1 {
            return Err(AppError::validation("max_attempts must be at least 1"));
        }

        Ok(Self {
            kind,
            payload: dto.payload,
            run_at: dto.run_at.unwrap_or_else(Utc::now),
            max_attempts,
        })
    }
}
