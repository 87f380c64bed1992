use std::path::Path;

use alarm_core::{Alarm, AlarmTime};

use crate::commands::common::{normalize_name, open_store, parse_days};
use crate::error::CliError;

pub async fn run_add(
    name_parts: &[String],
    at: &str,
    days: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let name = normalize_name(&name_parts.join(" "))?;
    let time = at.parse::<AlarmTime>()?;
    let weekdays = parse_days(days)?;

    let store = open_store(db_path).await?;
    let id = store
        .save(&Alarm::new(name, time).with_weekdays(weekdays))
        .await?;

    println!("{id}");
    Ok(())
}
