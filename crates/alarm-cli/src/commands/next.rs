use alarm_core::schedule::{delay_seconds_until, next_fire_time};
use alarm_core::AlarmTime;
use chrono::Local;

use crate::commands::common::{format_countdown, parse_days};
use crate::error::CliError;

pub fn run_next(at: &str, days: Option<&str>) -> Result<(), CliError> {
    let time = at.parse::<AlarmTime>()?;
    let weekdays = parse_days(days)?;

    let now = Local::now();
    let next = next_fire_time(time, &weekdays, &now);
    let seconds = delay_seconds_until(&next, &now);

    println!(
        "{seconds}\t{}\t(in {})",
        next.format("%Y-%m-%d %H:%M %a"),
        format_countdown(seconds)
    );
    Ok(())
}
