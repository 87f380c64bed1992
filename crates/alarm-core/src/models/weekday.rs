//! Weekday model
//!
//! Days are indexed 1=Sunday..7=Saturday, the convention used by calendar
//! notification triggers. Lists are persisted as comma-joined indices.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::util::split_list;

/// A day of the week, 1=Sunday..7=Saturday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: Self = Self(1);
    pub const MONDAY: Self = Self(2);
    pub const TUESDAY: Self = Self(3);
    pub const WEDNESDAY: Self = Self(4);
    pub const THURSDAY: Self = Self(5);
    pub const FRIDAY: Self = Self(6);
    pub const SATURDAY: Self = Self(7);

    /// Every day, Sunday first
    pub const ALL: [Self; 7] = [
        Self::SUNDAY,
        Self::MONDAY,
        Self::TUESDAY,
        Self::WEDNESDAY,
        Self::THURSDAY,
        Self::FRIDAY,
        Self::SATURDAY,
    ];

    /// Day for an index in `1..=7`
    pub const fn from_index(index: u8) -> Option<Self> {
        if index >= 1 && index <= 7 {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Convert from chrono's weekday (whose Sunday-based number starts at 0)
    pub const fn from_chrono(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::SUNDAY,
            Weekday::Mon => Self::MONDAY,
            Weekday::Tue => Self::TUESDAY,
            Weekday::Wed => Self::WEDNESDAY,
            Weekday::Thu => Self::THURSDAY,
            Weekday::Fri => Self::FRIDAY,
            Weekday::Sat => Self::SATURDAY,
        }
    }

    pub const fn to_chrono(self) -> Weekday {
        match self.0 {
            1 => Weekday::Sun,
            2 => Weekday::Mon,
            3 => Weekday::Tue,
            4 => Weekday::Wed,
            5 => Weekday::Thu,
            6 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Days from Sunday, `0..=6`
    pub fn days_from_sunday(self) -> u32 {
        u32::from(self.0) - 1
    }

    pub const fn short_name(self) -> &'static str {
        match self.0 {
            1 => "Sun",
            2 => "Mon",
            3 => "Tue",
            4 => "Wed",
            5 => "Thu",
            6 => "Fri",
            _ => "Sat",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DayOfWeek {
    type Err = Error;

    /// Accepts an index (`1..=7`) or an English day name (`sun`, `Monday`, ...)
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        if let Ok(index) = token.parse::<u8>() {
            return Self::from_index(index).ok_or_else(|| {
                Error::InvalidInput(format!("weekday index must be 1-7, got {index}"))
            });
        }

        let lower = token.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| lower.len() >= 3 && full_day_name(*day).starts_with(&lower))
            .ok_or_else(|| Error::InvalidInput(format!("unknown weekday '{token}'")))
    }
}

const fn full_day_name(day: DayOfWeek) -> &'static str {
    match day.0 {
        1 => "sunday",
        2 => "monday",
        3 => "tuesday",
        4 => "wednesday",
        5 => "thursday",
        6 => "friday",
        _ => "saturday",
    }
}

/// Parse a stored weekday column, silently dropping malformed tokens
///
/// Non-numeric tokens and indices outside `1..=7` are skipped; order and
/// duplicates of the remaining entries are preserved.
pub fn parse_weekdays(value: &str) -> Vec<DayOfWeek> {
    split_list(value)
        .filter_map(|token| token.parse::<u8>().ok())
        .filter_map(DayOfWeek::from_index)
        .collect()
}

/// Encode weekdays for storage as comma-joined indices
pub fn format_weekdays(days: &[DayOfWeek]) -> String {
    days.iter()
        .map(|day| day.index().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a user-supplied day list, rejecting unknown tokens
pub fn parse_day_list(value: &str) -> Result<Vec<DayOfWeek>> {
    split_list(value).map(str::parse).collect()
}
