//! Health report models.

use chrono::{DateTime, Utc};

use crate::model::health::{HealthDto, ServiceHealthDto};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceHealth {
    pub name: &'static str,
    pub up: bool,
    pub message: Option<String>,
    pub duration_ms: u64,
}

impl ServiceHealth {
    pub fn into_dto(self) -> ServiceHealthDto {
        ServiceHealthDto {
            name: self.name.to_string(),
            status: if self.up { "up" } else { "down" }.to_string(),
            message: self.message,
            duration_ms: self.duration_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub timestamp: DateTime<Utc>,
    pub services: Vec<ServiceHealth>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.services.iter().all(|service| service.up)
    }

    pub fn into_dto(self) -> HealthDto {
        HealthDto {
            status: if self.is_healthy() { "up" } else { "down" }.to_string(),
            timestamp: self.timestamp,
            services: self.services.into_iter().map(ServiceHealth::into_dto).collect(),
        }
    }
}
