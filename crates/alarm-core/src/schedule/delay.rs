//! Delay until the next occurrence of a wall-clock time

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use crate::models::{AlarmTime, DayOfWeek};

/// Seconds from `now` until the next occurrence of `time`
///
/// A time equal to or earlier than `now` rolls over to the following day.
/// Never returns less than 1.
///
/// # Examples
///
/// ```
/// use alarm_core::schedule::calculate_delay_seconds;
/// use alarm_core::AlarmTime;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap();
/// let eight = AlarmTime::new(8, 0).unwrap();
/// assert_eq!(calculate_delay_seconds(eight, &now), 61_200);
/// ```
pub fn calculate_delay_seconds<Tz: TimeZone>(time: AlarmTime, now: &DateTime<Tz>) -> u64 {
    delay_seconds_until(&next_occurrence(time, now), now)
}

/// Whole seconds between `now` and a later `target`, rounded, at least 1
pub fn delay_seconds_until<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> u64 {
    let millis = target
        .clone()
        .signed_duration_since(now.clone())
        .num_milliseconds();
    let seconds = (millis + 500).div_euclid(1000);
    u64::try_from(seconds).unwrap_or(0).max(1)
}

/// Whole seconds between `now` and a later `target`, rounded up, at least 1
///
/// A countdown of this length never ends before `target`.
pub fn countdown_seconds_until<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> u64 {
    let delta = target.clone().signed_duration_since(now.clone());
    let mut seconds = delta.num_seconds();
    if delta.subsec_nanos() > 0 {
        seconds += 1;
    }
    u64::try_from(seconds).unwrap_or(0).max(1)
}

/// The first instant strictly after `now` whose wall-clock time is `time`
pub fn next_occurrence<Tz: TimeZone>(time: AlarmTime, now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    let candidate = at_local(&tz, today, time);
    if candidate > *now {
        return candidate;
    }

    match today.succ_opt() {
        Some(tomorrow) => at_local(&tz, tomorrow, time),
        None => candidate + TimeDelta::days(1),
    }
}

/// The first instant strictly after `now` on `weekday` at `time`
pub fn next_weekday_occurrence<Tz: TimeZone>(
    weekday: DayOfWeek,
    time: AlarmTime,
    now: &DateTime<Tz>,
) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();
    let today_index = now.weekday().num_days_from_sunday();
    let days_ahead = (weekday.days_from_sunday() + 7 - today_index) % 7;

    let candidate = at_local(&tz, add_days(today, days_ahead), time);
    if candidate > *now {
        return candidate;
    }
    at_local(&tz, add_days(today, days_ahead + 7), time)
}

/// Earliest occurrence after `now` on any of `weekdays`, or any day when empty
pub fn next_fire_time<Tz: TimeZone>(
    time: AlarmTime,
    weekdays: &[DayOfWeek],
    now: &DateTime<Tz>,
) -> DateTime<Tz> {
    weekdays
        .iter()
        .map(|day| next_weekday_occurrence(*day, time, now))
        .min()
        .unwrap_or_else(|| next_occurrence(time, now))
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(chrono::Days::new(u64::from(days)))
        .unwrap_or(date)
}

/// Resolve a local date and time in `tz`
///
/// Ambiguous times (clocks turned back) take the earlier instant; times
/// skipped by a forward transition move past the gap.
fn at_local<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: AlarmTime) -> DateTime<Tz> {
    let naive = NaiveDateTime::new(date, time.to_naive_time());
    if let Some(resolved) = tz.from_local_datetime(&naive).earliest() {
        return resolved;
    }

    let mut shifted = naive;
    for _ in 0..4 {
        shifted += TimeDelta::minutes(30);
        if let Some(resolved) = tz.from_local_datetime(&shifted).earliest() {
            return resolved;
        }
    }
    tz.from_utc_datetime(&naive)
}
