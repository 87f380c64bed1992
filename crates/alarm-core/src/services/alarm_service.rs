//! Keeps scheduled notifications in step with stored alarms.

use chrono::{DateTime, Local};

use super::AlarmStore;
use crate::error::{Error, Result};
use crate::models::{Alarm, AlarmId};
use crate::notify::{NotificationRequest, NotificationScheduler};
use crate::schedule::{plan_triggers, TriggerStrategy};

/// Alarm store paired with a notification scheduler.
pub struct AlarmService<S> {
    store: AlarmStore,
    scheduler: S,
    strategy: TriggerStrategy,
}

impl<S: NotificationScheduler> AlarmService<S> {
    pub const fn new(store: AlarmStore, scheduler: S, strategy: TriggerStrategy) -> Self {
        Self {
            store,
            scheduler,
            strategy,
        }
    }

    pub const fn store(&self) -> &AlarmStore {
        &self.store
    }

    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub const fn strategy(&self) -> TriggerStrategy {
        self.strategy
    }

    /// Save an alarm and (re)schedule its notifications.
    ///
    /// Notifications recorded for the stored version of the alarm are
    /// cancelled once the save succeeds; the returned alarm carries the new
    /// ids.
    pub async fn arm(&self, alarm: Alarm) -> Result<Alarm> {
        self.arm_at(alarm, &Local::now()).await
    }

    /// [`arm`](Self::arm) with triggers planned from `now`.
    pub async fn arm_at(&self, mut alarm: Alarm, now: &DateTime<Local>) -> Result<Alarm> {
        let mut stale = std::mem::take(&mut alarm.notification_ids);
        if alarm.id.is_assigned() {
            if let Some(existing) = self.store.get(alarm.id).await? {
                for id in existing.notification_ids {
                    if !stale.contains(&id) {
                        stale.push(id);
                    }
                }
            }
        }

        // Stale ids stay on the row until they are actually cancelled.
        alarm.notification_ids = stale;
        alarm.id = self.store.save(&alarm).await?;
        let stale = std::mem::take(&mut alarm.notification_ids);
        self.scheduler.cancel(&stale).await?;

        let mut ids = Vec::new();
        for trigger in plan_triggers(&alarm, self.strategy, now) {
            let request = NotificationRequest {
                alarm_id: alarm.id,
                title: notification_title(&alarm),
                trigger,
            };
            match self.scheduler.schedule(request).await {
                Ok(id) => ids.push(id),
                Err(error) => {
                    // Don't leave half of the triggers running.
                    self.scheduler.cancel(&ids).await.ok();
                    self.store
                        .replace_notification_ids(alarm.id, &[])
                        .await
                        .ok();
                    return Err(error);
                }
            }
        }

        if !self.store.replace_notification_ids(alarm.id, &ids).await? {
            self.scheduler.cancel(&ids).await.ok();
            return Err(Error::NotFound(alarm.id.to_string()));
        }
        tracing::info!(
            "Armed alarm {} '{}' with {} notification(s)",
            alarm.id,
            alarm.name,
            ids.len()
        );

        alarm.notification_ids = ids;
        Ok(alarm)
    }

    /// Re-arm a stored alarm after one of its notifications fired.
    ///
    /// The next occurrence is planned strictly after `fired_at`, so the
    /// occurrence that just fired is never scheduled again.
    pub async fn rearm(&self, id: AlarmId, fired_at: &DateTime<Local>) -> Result<Option<Alarm>> {
        match self.store.get(id).await? {
            Some(alarm) => self.arm_at(alarm, fired_at).await.map(Some),
            None => Ok(None),
        }
    }

    /// Cancel an alarm's notifications without deleting it.
    pub async fn disarm(&self, id: AlarmId) -> Result<Option<Alarm>> {
        let Some(mut alarm) = self.store.get(id).await? else {
            return Ok(None);
        };

        self.scheduler.cancel(&alarm.notification_ids).await?;
        self.store.replace_notification_ids(id, &[]).await?;
        alarm.notification_ids.clear();
        Ok(Some(alarm))
    }

    /// Cancel an alarm's notifications and delete it.
    pub async fn remove(&self, id: AlarmId) -> Result<bool> {
        if let Some(alarm) = self.store.get(id).await? {
            self.scheduler.cancel(&alarm.notification_ids).await?;
        }
        self.store.delete(id).await
    }

    /// Re-arm every stored alarm.
    pub async fn arm_all(&self) -> Result<Vec<Alarm>> {
        let mut armed = Vec::new();
        for alarm in self.store.list().await? {
            armed.push(self.arm(alarm).await?);
        }
        Ok(armed)
    }
}

/// Title shown for an alarm's notifications
pub fn notification_title(alarm: &Alarm) -> String {
    format!("{} ({})", alarm.name, alarm.time)
}
