//! Shared storage handle

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{AlarmRepository, Database, LibSqlAlarmRepository};
use crate::models::{Alarm, AlarmId, NotificationId};
use crate::Result;

/// Thread-safe handle to the alarm database.
///
/// The connection is opened once when the handle is created; clones share it.
#[derive(Clone)]
pub struct AlarmStore {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl AlarmStore {
    /// Open the store at the given filesystem path, creating parent directories.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path).await?;
        tracing::debug!("Alarm store ready at {}", db_path.display());
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory store (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Ensure the schema exists.
    pub async fn init(&self) -> Result<()> {
        let db = self.db.lock().await;
        db.init().await
    }

    /// Insert or update an alarm.
    pub async fn save(&self, alarm: &Alarm) -> Result<AlarmId> {
        let db = self.db.lock().await;
        let repo = LibSqlAlarmRepository::new(db.connection());
        repo.save(alarm).await
    }

    /// Fetch an alarm by id.
    pub async fn get(&self, id: AlarmId) -> Result<Option<Alarm>> {
        let db = self.db.lock().await;
        let repo = LibSqlAlarmRepository::new(db.connection());
        repo.get(id).await
    }

    /// List alarms ordered by time of day.
    pub async fn list(&self) -> Result<Vec<Alarm>> {
        let db = self.db.lock().await;
        let repo = LibSqlAlarmRepository::new(db.connection());
        repo.list().await
    }

    /// Delete an alarm; missing ids are a no-op.
    pub async fn delete(&self, id: AlarmId) -> Result<bool> {
        let db = self.db.lock().await;
        let repo = LibSqlAlarmRepository::new(db.connection());
        repo.delete(id).await
    }

    /// Replace the notification ids persisted for an alarm.
    pub async fn replace_notification_ids(
        &self,
        id: AlarmId,
        ids: &[NotificationId],
    ) -> Result<bool> {
        let db = self.db.lock().await;
        let repo = LibSqlAlarmRepository::new(db.connection());
        repo.replace_notification_ids(id, ids).await
    }
}
