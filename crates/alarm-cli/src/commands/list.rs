use std::path::Path;

use chrono::Local;

use crate::commands::common::{alarm_to_list_item, format_alarm_lines, open_store, AlarmListItem};
use crate::error::CliError;

pub async fn run_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let alarms = store.list().await?;
    let now = Local::now();

    if as_json {
        let json_items = alarms
            .iter()
            .map(|alarm| alarm_to_list_item(alarm, &now))
            .collect::<Vec<AlarmListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if alarms.is_empty() {
        println!("No alarms yet. Create one with `alarm add <name> --at HH:MM`.");
    } else {
        for line in format_alarm_lines(&alarms, &now) {
            println!("{line}");
        }
    }

    Ok(())
}
