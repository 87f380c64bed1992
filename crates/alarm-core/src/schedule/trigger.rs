//! Trigger descriptors handed to the notification scheduler

use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use super::delay::{
    calculate_delay_seconds, countdown_seconds_until, delay_seconds_until, next_fire_time,
    next_occurrence, next_weekday_occurrence,
};
use crate::models::{Alarm, AlarmTime, DayOfWeek};

/// When a scheduled notification fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// After a fixed number of seconds, optionally repeating at that period
    Interval { seconds: u64, repeats: bool },
    /// Every day at a wall-clock time
    Daily { time: AlarmTime },
    /// Every week on one day at a wall-clock time
    Weekly { weekday: DayOfWeek, time: AlarmTime },
}

impl Trigger {
    /// Whether the trigger fires more than once
    pub const fn repeats(&self) -> bool {
        match self {
            Self::Interval { repeats, .. } => *repeats,
            Self::Daily { .. } | Self::Weekly { .. } => true,
        }
    }

    /// Seconds from `now` until the trigger next fires (at least 1)
    pub fn next_delay_seconds<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u64 {
        match *self {
            Self::Interval { seconds, .. } => seconds.max(1),
            Self::Daily { time } => calculate_delay_seconds(time, now),
            Self::Weekly { weekday, time } => {
                delay_seconds_until(&next_weekday_occurrence(weekday, time, now), now)
            }
        }
    }

    /// The instant the trigger fires next, strictly after `after`
    ///
    /// Intervals count from `after` itself, so feeding back the previous
    /// fire instant yields evenly spaced repeats. `None` when the instant
    /// is out of range.
    pub fn next_fire_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match *self {
            Self::Interval { seconds, .. } => {
                let seconds = i64::try_from(seconds.max(1)).ok()?;
                after
                    .clone()
                    .checked_add_signed(TimeDelta::try_seconds(seconds)?)
            }
            Self::Daily { time } => Some(next_occurrence(time, after)),
            Self::Weekly { weekday, time } => Some(next_weekday_occurrence(weekday, time, after)),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval {
                seconds,
                repeats: false,
            } => write!(f, "once in {seconds}s"),
            Self::Interval {
                seconds,
                repeats: true,
            } => write!(f, "every {seconds}s"),
            Self::Daily { time } => write!(f, "daily at {time}"),
            Self::Weekly { weekday, time } => write!(f, "{weekday} at {time}"),
        }
    }
}

/// How an alarm is turned into triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerStrategy {
    /// Repeating calendar triggers: one daily trigger, or one weekly trigger
    /// per selected day
    #[default]
    Calendar,
    /// A single one-shot countdown to the next fire time; the owner re-arms
    /// the alarm after it fires
    ///
    /// The countdown is rounded up so it never ends before the alarm time.
    Interval,
}

/// Triggers that realize `alarm` under `strategy`
pub fn plan_triggers<Tz: TimeZone>(
    alarm: &Alarm,
    strategy: TriggerStrategy,
    now: &DateTime<Tz>,
) -> Vec<Trigger> {
    let weekdays = alarm.distinct_weekdays();

    match strategy {
        TriggerStrategy::Calendar if weekdays.is_empty() => {
            vec![Trigger::Daily { time: alarm.time }]
        }
        TriggerStrategy::Calendar => weekdays
            .into_iter()
            .map(|weekday| Trigger::Weekly {
                weekday,
                time: alarm.time,
            })
            .collect(),
        TriggerStrategy::Interval => {
            let next = next_fire_time(alarm.time, &weekdays, now);
            vec![Trigger::Interval {
                seconds: countdown_seconds_until(&next, now),
                repeats: false,
            }]
        }
    }
}
