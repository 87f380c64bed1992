//! alarm-core - Core library for alarm
//!
//! This crate contains the alarm models, the `SQLite` store, and the
//! next-occurrence computation shared by every alarm front-end.

pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{Alarm, AlarmId, AlarmTime, DayOfWeek, NotificationId};
