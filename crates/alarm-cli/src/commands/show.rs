use std::path::Path;

use chrono::Local;

use crate::commands::common::{alarm_to_list_item, open_store, parse_alarm_id, require_alarm};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let id = parse_alarm_id(id)?;
    let store = open_store(db_path).await?;
    let alarm = require_alarm(&store, id).await?;
    let item = alarm_to_list_item(&alarm, &Local::now());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    println!("id:       {}", item.id);
    println!("name:     {}", item.name);
    println!("time:     {}", item.time);
    println!("repeat:   {}", item.repeat);
    println!("next:     {} ({}s)", item.next_fire_at, item.seconds_until_next);
    if !item.notification_ids.is_empty() {
        println!("notified: {}", item.notification_ids.join(", "));
    }
    Ok(())
}
