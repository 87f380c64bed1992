use std::path::Path;

use alarm_core::AlarmTime;

use crate::commands::common::{
    normalize_name, open_store, parse_alarm_id, parse_days, require_alarm,
};
use crate::error::CliError;

pub struct EditArgs<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub at: Option<&'a str>,
    pub days: Option<&'a str>,
    pub every_day: bool,
}

pub async fn run_edit(args: EditArgs<'_>, db_path: &Path) -> Result<(), CliError> {
    let id = parse_alarm_id(args.id)?;
    if args.name.is_none() && args.at.is_none() && args.days.is_none() && !args.every_day {
        return Err(CliError::NothingToEdit);
    }

    let store = open_store(db_path).await?;
    let mut alarm = require_alarm(&store, id).await?;

    if let Some(name) = args.name {
        alarm.name = normalize_name(name)?;
    }
    if let Some(at) = args.at {
        alarm.time = at.parse::<AlarmTime>()?;
    }
    if args.every_day {
        alarm.weekdays.clear();
    } else if args.days.is_some() {
        alarm.weekdays = parse_days(args.days)?;
    }

    let saved = store.save(&alarm).await?;
    println!("{saved}");
    Ok(())
}
