//! Alarm repository implementation

use crate::error::{Error, Result};
use crate::models::{
    format_notification_ids, format_weekdays, parse_notification_ids, parse_weekdays, Alarm,
    AlarmId, AlarmTime, NotificationId,
};
use libsql::{params, Connection};

const SELECT_COLUMNS: &str = "SELECT id, name, hour, minute, weekdays, notification_ids FROM alarms";

/// Trait for alarm storage operations (async)
#[allow(async_fn_in_trait)]
pub trait AlarmRepository {
    /// Insert or update an alarm, returning its id
    ///
    /// An assigned id that matches a row updates that row in place; any other
    /// id inserts a new row under a freshly assigned id.
    async fn save(&self, alarm: &Alarm) -> Result<AlarmId>;

    /// Get an alarm by ID
    async fn get(&self, id: AlarmId) -> Result<Option<Alarm>>;

    /// List all alarms by time of day, ties in insertion order
    async fn list(&self) -> Result<Vec<Alarm>>;

    /// Delete an alarm, returning whether a row was removed
    async fn delete(&self, id: AlarmId) -> Result<bool>;

    /// Replace the stored notification ids of an alarm
    async fn replace_notification_ids(&self, id: AlarmId, ids: &[NotificationId]) -> Result<bool>;
}

/// libSQL implementation of `AlarmRepository`
pub struct LibSqlAlarmRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlAlarmRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse an alarm from a database row
    fn parse_alarm(row: &libsql::Row) -> Result<Alarm> {
        let id: i64 = row.get(0)?;
        let time = AlarmTime::from_columns(row.get(2)?, row.get(3)?)
            .map_err(|e| Error::Database(format!("alarm {id} has an invalid time: {e}")))?;
        let weekdays: String = row.get(4)?;
        let notification_ids: String = row.get(5)?;

        Ok(Alarm {
            id: AlarmId::new(id),
            name: row.get(1)?,
            time,
            weekdays: parse_weekdays(&weekdays),
            notification_ids: parse_notification_ids(&notification_ids),
        })
    }
}

impl AlarmRepository for LibSqlAlarmRepository<'_> {
    async fn save(&self, alarm: &Alarm) -> Result<AlarmId> {
        let weekdays = format_weekdays(&alarm.weekdays);
        let notification_ids = format_notification_ids(&alarm.notification_ids);
        let hour = i64::from(alarm.time.hour());
        let minute = i64::from(alarm.time.minute());

        let tx = self.conn.transaction().await?;

        if alarm.id.is_assigned() {
            let updated = tx
                .execute(
                    "UPDATE alarms SET name = ?, hour = ?, minute = ?, weekdays = ?, notification_ids = ? WHERE id = ?",
                    params![
                        alarm.name.as_str(),
                        hour,
                        minute,
                        weekdays.as_str(),
                        notification_ids.as_str(),
                        alarm.id.get()
                    ],
                )
                .await?;

            if updated > 0 {
                tx.commit().await?;
                tracing::debug!("Updated alarm {}", alarm.id);
                return Ok(alarm.id);
            }
        }

        tx.execute(
            "INSERT INTO alarms (name, hour, minute, weekdays, notification_ids) VALUES (?, ?, ?, ?, ?)",
            params![
                alarm.name.as_str(),
                hour,
                minute,
                weekdays.as_str(),
                notification_ids.as_str()
            ],
        )
        .await?;
        let id = AlarmId::new(tx.last_insert_rowid());
        tx.commit().await?;

        tracing::debug!("Inserted alarm {}", id);
        Ok(id)
    }

    async fn get(&self, id: AlarmId) -> Result<Option<Alarm>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?"), [id.get()])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_alarm(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Alarm>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} ORDER BY hour, minute, id"), ())
            .await?;

        let mut alarms = Vec::new();
        while let Some(row) = rows.next().await? {
            alarms.push(Self::parse_alarm(&row)?);
        }
        Ok(alarms)
    }

    async fn delete(&self, id: AlarmId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM alarms WHERE id = ?", [id.get()])
            .await?;
        Ok(rows > 0)
    }

    async fn replace_notification_ids(&self, id: AlarmId, ids: &[NotificationId]) -> Result<bool> {
        let stored = format_notification_ids(ids);
        let rows = self
            .conn
            .execute(
                "UPDATE alarms SET notification_ids = ? WHERE id = ?",
                params![stored.as_str(), id.get()],
            )
            .await?;
        Ok(rows > 0)
    }
}
