//! Notification identifier model

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::split_list;

/// Opaque identifier of a scheduled notification
///
/// Ids are stored comma-joined, so they may not be empty, contain a comma, or
/// carry surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Wrap an identifier handed out by a notification scheduler
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || value.trim() != value || value.contains(',') {
            return Err(Error::InvalidInput(format!(
                "invalid notification id '{value}'"
            )));
        }
        Ok(Self(value))
    }

    /// Generate a fresh random identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a stored notification-id column, dropping empty tokens
pub fn parse_notification_ids(value: &str) -> Vec<NotificationId> {
    split_list(value)
        .map(|token| NotificationId(token.to_string()))
        .collect()
}

/// Encode notification ids for storage
pub fn format_notification_ids(ids: &[NotificationId]) -> String {
    ids.iter()
        .map(NotificationId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
