use std::{ops::RangeInclusive, path::PathBuf, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_ISSUER: &str = "atrium";
const DEFAULT_JWT_TTL_SECONDS: i64 = 3600;
const DEFAULT_STORAGE_DIR: &str = "./uploads";
const DEFAULT_BACKUP_DIR: &str = "./backups";
const DEFAULT_BACKUP_RETENTION_DAYS: i64 = 7;

const JWT_TTL_RANGE: RangeInclusive<i64> = 1..=31_536_000;
const BACKUP_RETENTION_RANGE: RangeInclusive<i64> = 1..=36_500;

/// Process-wide configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_seconds: i64,

    pub storage_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub backup_retention_days: i64,

    pub search_engine_url: Option<String>,
    pub search_engine_api_key: Option<String>,

    pub cors_allowed_origin: Option<String>,
    pub job_worker_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: optional("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
            jwt_ttl_seconds: bounded(
                "JWT_TTL_SECONDS",
                parsed("JWT_TTL_SECONDS")?,
                DEFAULT_JWT_TTL_SECONDS,
                JWT_TTL_RANGE,
            )?,
            storage_dir: optional("STORAGE_DIR")
                .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string())
                .into(),
            backup_dir: optional("BACKUP_DIR")
                .unwrap_or_else(|| DEFAULT_BACKUP_DIR.to_string())
                .into(),
            backup_retention_days: bounded(
                "BACKUP_RETENTION_DAYS",
                parsed("BACKUP_RETENTION_DAYS")?,
                DEFAULT_BACKUP_RETENTION_DAYS,
                BACKUP_RETENTION_RANGE,
            )?,
            search_engine_url: optional("SEARCH_ENGINE_URL"),
            search_engine_api_key: optional("SEARCH_ENGINE_API_KEY"),
            cors_allowed_origin: optional("CORS_ALLOWED_ORIGIN"),
            job_worker_enabled: parsed("JOB_WORKER_ENABLED")?.unwrap_or(true),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(name)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Applies `default` when unset and rejects values outside `range`.
fn bounded(
    name: &str,
    value: Option<i64>,
    default: i64,
    range: RangeInclusive<i64>,
) -> Result<i64, ConfigError> {
    let value = value.unwrap_or(default);
    if !range.contains(&value) {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            reason: format!(
                "{} is outside {}..={}",
                value,
                range.start(),
                range.end()
            ),
        });
    }

    Ok(value)
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: DEFAULT_BIND_ADDR.to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
        jwt_ttl_seconds: DEFAULT_JWT_TTL_SECONDS,
        storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        backup_retention_days: DEFAULT_BACKUP_RETENTION_DAYS,
        search_engine_url: None,
        search_engine_api_key: None,
        cors_allowed_origin: None,
        job_worker_enabled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_applies_default() {
        let value = bounded("BACKUP_RETENTION_DAYS", None, 7, BACKUP_RETENTION_RANGE).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn bounded_rejects_non_positive_and_huge_values() {
        for value in [0, -3, i64::MAX] {
            let result = bounded(
                "BACKUP_RETENTION_DAYS",
                Some(value),
                7,
                BACKUP_RETENTION_RANGE,
            );
            assert!(matches!(
                result,
                Err(ConfigError::InvalidValue { ref name, .. }) if name == "BACKUP_RETENTION_DAYS"
            ));
        }

        assert!(bounded("JWT_TTL_SECONDS", Some(-1), 3600, JWT_TTL_RANGE).is_err());
        assert_eq!(
            bounded("JWT_TTL_SECONDS", Some(900), 3600, JWT_TTL_RANGE).unwrap(),
            900
        );
    }
}
