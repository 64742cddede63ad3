use super::*;
use crate::server::service::backup::BackupService;

mod backup;
