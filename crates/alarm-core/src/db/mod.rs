//! Database layer for alarm

mod connection;
mod migrations;
mod repository;

pub use connection::{Database, DATABASE_NAME};
pub use repository::{AlarmRepository, LibSqlAlarmRepository};
