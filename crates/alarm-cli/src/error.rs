use std::io;

use alarm_core::AlarmId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] alarm_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Alarm name cannot be empty")]
    EmptyName,
    #[error("Alarm ID must be a positive integer, got '{0}'")]
    InvalidAlarmId(String),
    #[error("Alarm not found: {0}")]
    AlarmNotFound(AlarmId),
    #[error("Nothing to change; pass --name, --at, --days or --every-day")]
    NothingToEdit,
    #[error("Configuration error: {0}")]
    Config(String),
}
