//! Data models for alarm

mod alarm;
mod notification;
mod weekday;

pub use alarm::{Alarm, AlarmId, AlarmTime};
pub use notification::{format_notification_ids, parse_notification_ids, NotificationId};
pub use weekday::{format_weekdays, parse_day_list, parse_weekdays, DayOfWeek};
