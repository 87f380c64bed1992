//! Tokio timer backed scheduler for long-running processes

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use super::{Clock, FiredNotification, NotificationRequest, NotificationScheduler, SystemClock};
use crate::error::{Error, Result};
use crate::models::NotificationId;

type TaskMap = Arc<Mutex<HashMap<NotificationId, JoinHandle<()>>>>;

/// Scheduler that fires notifications from tokio tasks in this process
///
/// Fired notifications are delivered on the receiver returned by
/// [`InProcessScheduler::new`]. Each task sleeps until the exact instant
/// its trigger is due; repeating triggers then compute their next instant
/// strictly after the one that just fired.
#[derive(Clone)]
pub struct InProcessScheduler {
    tasks: TaskMap,
    fired: mpsc::UnboundedSender<FiredNotification>,
    clock: Arc<dyn Clock>,
}

impl InProcessScheduler {
    /// Create a scheduler on the system clock and the receiver its
    /// notifications arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FiredNotification>) {
        Self::with_clock(SystemClock)
    }

    /// Create a scheduler that reads the time from `clock`
    pub fn with_clock(
        clock: impl Clock + 'static,
    ) -> (Self, mpsc::UnboundedReceiver<FiredNotification>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            fired,
            clock: Arc::new(clock),
        };
        (scheduler, receiver)
    }

    /// Number of notifications currently scheduled
    pub async fn pending(&self) -> usize {
        self.tasks.lock().await.len()
    }
}

impl NotificationScheduler for InProcessScheduler {
    async fn schedule(&self, request: NotificationRequest) -> Result<NotificationId> {
        if self.fired.is_closed() {
            return Err(Error::Scheduler(
                "notification receiver has been dropped".to_string(),
            ));
        }

        let id = NotificationId::generate();
        let tasks = Arc::clone(&self.tasks);
        let fired = self.fired.clone();
        let clock = Arc::clone(&self.clock);
        let task_id = id.clone();

        tracing::debug!(
            "Scheduling notification {} for alarm {} ({})",
            id,
            request.alarm_id,
            request.trigger
        );

        // Hold the lock across spawn so a one-shot task cannot try to
        // deregister itself before it is registered.
        let mut guard = self.tasks.lock().await;
        let handle = tokio::spawn(async move {
            let mut after = clock.now();
            while let Some(due) = request.trigger.next_fire_after(&after) {
                sleep_until(clock.as_ref(), &due).await;

                let notification = FiredNotification {
                    id: task_id.clone(),
                    alarm_id: request.alarm_id,
                    title: request.title.clone(),
                    repeats: request.trigger.repeats(),
                    fired_at: due,
                };
                if fired.send(notification).is_err() || !request.trigger.repeats() {
                    break;
                }
                after = due;
            }
            tasks.lock().await.remove(&task_id);
        });
        guard.insert(id.clone(), handle);

        Ok(id)
    }

    async fn cancel(&self, ids: &[NotificationId]) -> Result<()> {
        let mut tasks = self.tasks.lock().await;
        for id in ids {
            if let Some(handle) = tasks.remove(id) {
                handle.abort();
                tracing::debug!("Cancelled notification {}", id);
            }
        }
        Ok(())
    }
}

/// Sleep until `clock` reads at or past `due`
async fn sleep_until(clock: &dyn Clock, due: &DateTime<Local>) {
    while let Ok(remaining) = due.signed_duration_since(clock.now()).to_std() {
        if remaining.is_zero() {
            break;
        }
        tokio::time::sleep(remaining).await;
    }
}
