//! Notification scheduling seam
//!
//! The store only persists the identifiers a scheduler hands back; delivery
//! itself lives behind [`NotificationScheduler`].

mod clock;
mod in_process;

pub use clock::{Clock, MonotonicClock, SystemClock};
pub use in_process::InProcessScheduler;

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::models::{AlarmId, NotificationId};
use crate::schedule::Trigger;

/// A notification to schedule for an alarm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub alarm_id: AlarmId,
    pub title: String,
    pub trigger: Trigger,
}

/// Delivered when a scheduled notification fires
#[derive(Debug, Clone)]
pub struct FiredNotification {
    pub id: NotificationId,
    pub alarm_id: AlarmId,
    pub title: String,
    /// Whether the notification stays scheduled after this delivery
    pub repeats: bool,
    /// The instant the notification was due
    pub fired_at: DateTime<Local>,
}

/// Trait for notification delivery backends (async)
#[allow(async_fn_in_trait)]
pub trait NotificationScheduler {
    /// Schedule a notification and return its identifier
    async fn schedule(&self, request: NotificationRequest) -> Result<NotificationId>;

    /// Cancel scheduled notifications; unknown ids are ignored
    async fn cancel(&self, ids: &[NotificationId]) -> Result<()>;
}
