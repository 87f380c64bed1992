use std::path::Path;

use alarm_core::models::parse_day_list;
use alarm_core::schedule::{delay_seconds_until, next_fire_time};
use alarm_core::services::AlarmStore;
use alarm_core::{Alarm, AlarmId, DayOfWeek};
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct AlarmListItem {
    pub id: i64,
    pub name: String,
    pub time: String,
    pub hour: u32,
    pub minute: u32,
    pub weekdays: Vec<u8>,
    pub repeat: String,
    pub next_fire_at: String,
    pub seconds_until_next: u64,
    pub notification_ids: Vec<String>,
}

pub async fn open_store(db_path: &Path) -> Result<AlarmStore, CliError> {
    Ok(AlarmStore::open_path(db_path.to_path_buf()).await?)
}

pub async fn require_alarm(store: &AlarmStore, id: AlarmId) -> Result<Alarm, CliError> {
    store.get(id).await?.ok_or(CliError::AlarmNotFound(id))
}

pub fn parse_alarm_id(id: &str) -> Result<AlarmId, CliError> {
    id.parse::<AlarmId>()
        .ok()
        .filter(|id| id.is_assigned())
        .ok_or_else(|| CliError::InvalidAlarmId(id.trim().to_string()))
}

pub fn normalize_name(name: &str) -> Result<String, CliError> {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        Err(CliError::EmptyName)
    } else {
        Ok(collapsed)
    }
}

pub fn parse_days(days: Option<&str>) -> Result<Vec<DayOfWeek>, CliError> {
    match days {
        Some(days) => Ok(parse_day_list(days)?),
        None => Ok(Vec::new()),
    }
}

pub fn format_repeat(days: &[DayOfWeek]) -> String {
    if days.is_empty() {
        return "every day".to_string();
    }
    let mut days = days.to_vec();
    days.sort_unstable();
    days.dedup();
    days.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_countdown(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3600;
    let minutes = seconds % 3600 / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

pub fn alarm_to_list_item(alarm: &Alarm, now: &DateTime<Local>) -> AlarmListItem {
    let next = next_fire_time(alarm.time, &alarm.weekdays, now);

    AlarmListItem {
        id: alarm.id.get(),
        name: alarm.name.clone(),
        time: alarm.time.to_string(),
        hour: alarm.time.hour(),
        minute: alarm.time.minute(),
        weekdays: alarm.weekdays.iter().map(|day| day.index()).collect(),
        repeat: format_repeat(&alarm.weekdays),
        next_fire_at: next.to_rfc3339(),
        seconds_until_next: delay_seconds_until(&next, now),
        notification_ids: alarm
            .notification_ids
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

pub fn format_alarm_lines(alarms: &[Alarm], now: &DateTime<Local>) -> Vec<String> {
    alarms
        .iter()
        .map(|alarm| {
            let next = next_fire_time(alarm.time, &alarm.weekdays, now);
            let countdown = format_countdown(delay_seconds_until(&next, now));
            let name = truncate(&alarm.name, 30);
            let repeat = format_repeat(&alarm.weekdays);

            format!(
                "{:>4}  {}  {name:<30}  {repeat:<27}  in {countdown}",
                alarm.id.get(),
                alarm.time
            )
        })
        .collect()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let mut truncated = value
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
