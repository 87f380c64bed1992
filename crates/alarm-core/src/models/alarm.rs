//! Alarm model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::Serialize;

use super::{DayOfWeek, NotificationId};
use crate::error::{Error, Result};

/// Store-assigned alarm identifier.
///
/// Non-positive values mean the alarm has not been saved yet; saving such an
/// alarm inserts a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AlarmId(i64);

impl AlarmId {
    /// Identifier of an alarm that has not been persisted
    pub const NEW: Self = Self(0);

    /// Wrap a raw row id
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw row id
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this id can refer to a stored row
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl Default for AlarmId {
    fn default() -> Self {
        Self::NEW
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlarmId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Local time of day an alarm fires at (minute precision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AlarmTime {
    hour: u32,
    minute: u32,
}

impl AlarmTime {
    /// Create a time of day, validating `hour` in `0..=23` and `minute` in `0..=59`
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 {
            return Err(Error::InvalidInput(format!(
                "hour must be between 0 and 23, got {hour}"
            )));
        }
        if minute > 59 {
            return Err(Error::InvalidInput(format!(
                "minute must be between 0 and 59, got {minute}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Build from raw integer columns as stored in the database
    pub fn from_columns(hour: i64, minute: i64) -> Result<Self> {
        let hour = u32::try_from(hour)
            .map_err(|_| Error::InvalidInput(format!("hour out of range: {hour}")))?;
        let minute = u32::try_from(minute)
            .map_err(|_| Error::InvalidInput(format!("minute out of range: {minute}")))?;
        Self::new(hour, minute)
    }

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// The wall-clock time with seconds zeroed
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = Error;

    /// Parse `H:MM` or `HH:MM`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("expected a time like 07:30, got '{s}'"));
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

/// A persisted alarm definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alarm {
    /// Row identifier (`AlarmId::NEW` until saved)
    pub id: AlarmId,
    /// Display label
    pub name: String,
    /// Time of day
    #[serde(flatten)]
    pub time: AlarmTime,
    /// Days the alarm repeats on; empty means every day
    pub weekdays: Vec<DayOfWeek>,
    /// Identifiers of the notifications currently scheduled for this alarm
    pub notification_ids: Vec<NotificationId>,
}

impl Alarm {
    /// Create an unsaved alarm that fires every day
    #[must_use]
    pub fn new(name: impl Into<String>, time: AlarmTime) -> Self {
        Self {
            id: AlarmId::NEW,
            name: name.into(),
            time,
            weekdays: Vec::new(),
            notification_ids: Vec::new(),
        }
    }

    /// Restrict the alarm to the given days
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Whether the alarm fires every day
    pub fn is_daily(&self) -> bool {
        self.weekdays.is_empty()
    }

    /// Selected days, sorted Sunday first and deduplicated
    pub fn distinct_weekdays(&self) -> Vec<DayOfWeek> {
        let mut days = self.weekdays.clone();
        days.sort_unstable();
        days.dedup();
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_id_assignment() {
        assert!(!AlarmId::NEW.is_assigned());
        assert!(!AlarmId::new(-4).is_assigned());
        assert!(AlarmId::new(1).is_assigned());
        assert_eq!(AlarmId::default(), AlarmId::NEW);
    }

    #[test]
    fn test_alarm_id_parse() {
        let id: AlarmId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<AlarmId>().is_err());
    }

    #[test]
    fn test_alarm_time_bounds() {
        assert!(AlarmTime::new(0, 0).is_ok());
        assert!(AlarmTime::new(23, 59).is_ok());
        assert!(matches!(AlarmTime::new(24, 0), Err(Error::InvalidInput(_))));
        assert!(matches!(AlarmTime::new(8, 60), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_alarm_time_from_columns_rejects_negative() {
        assert!(AlarmTime::from_columns(-1, 0).is_err());
        assert_eq!(
            AlarmTime::from_columns(7, 5).unwrap(),
            AlarmTime::new(7, 5).unwrap()
        );
    }

    #[test]
    fn test_alarm_time_parse_and_display() {
        let time: AlarmTime = "7:05".parse().unwrap();
        assert_eq!(time.hour(), 7);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "07:05");

        assert!("7".parse::<AlarmTime>().is_err());
        assert!("07:5".parse::<AlarmTime>().is_err());
        assert!("25:00".parse::<AlarmTime>().is_err());
    }

    #[test]
    fn test_alarm_new_is_daily() {
        let alarm = Alarm::new("Wake up", AlarmTime::new(7, 0).unwrap());
        assert_eq!(alarm.id, AlarmId::NEW);
        assert!(alarm.is_daily());
        assert!(alarm.notification_ids.is_empty());
    }

    #[test]
    fn test_distinct_weekdays_sorted() {
        let alarm = Alarm::new("Gym", AlarmTime::new(18, 30).unwrap()).with_weekdays([
            DayOfWeek::FRIDAY,
            DayOfWeek::MONDAY,
            DayOfWeek::FRIDAY,
        ]);
        assert_eq!(
            alarm.distinct_weekdays(),
            vec![DayOfWeek::MONDAY, DayOfWeek::FRIDAY]
        );
        assert_eq!(alarm.weekdays.len(), 3);
    }
}
