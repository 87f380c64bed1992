//! Next-occurrence computation and trigger planning

mod delay;
mod trigger;

pub use delay::{
    calculate_delay_seconds, countdown_seconds_until, delay_seconds_until, next_fire_time,
    next_occurrence, next_weekday_occurrence,
};
pub use trigger::{plan_triggers, Trigger, TriggerStrategy};
