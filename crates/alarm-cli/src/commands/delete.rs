use std::path::Path;

use crate::commands::common::{open_store, parse_alarm_id};
use crate::error::CliError;

pub async fn run_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let id = parse_alarm_id(id)?;
    let store = open_store(db_path).await?;

    if store.delete(id).await? {
        println!("{id}");
    } else {
        tracing::warn!("Alarm {} did not exist; nothing deleted", id);
    }
    Ok(())
}
