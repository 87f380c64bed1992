//! Shared services used by alarm front-ends

mod alarm_service;
mod store;

pub use alarm_service::{notification_title, AlarmService};
pub use store::AlarmStore;
