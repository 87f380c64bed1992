use std::path::Path;

use alarm_core::notify::{FiredNotification, InProcessScheduler, NotificationScheduler};
use alarm_core::schedule::TriggerStrategy;
use alarm_core::services::AlarmService;
use chrono::Local;

use crate::commands::common::{format_alarm_lines, open_store};
use crate::commands::config::strategy_label;
use crate::error::CliError;

pub async fn run_scheduler(strategy: TriggerStrategy, db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path).await?;
    let (scheduler, mut fired) = InProcessScheduler::new();
    let service = AlarmService::new(store, scheduler, strategy);

    let armed = service.arm_all().await?;
    if armed.is_empty() {
        println!("No alarms to run.");
        return Ok(());
    }

    println!(
        "Armed {} alarm(s) using {} triggers; press Ctrl-C to stop.",
        armed.len(),
        strategy_label(strategy)
    );
    for line in format_alarm_lines(&armed, &Local::now()) {
        println!("{line}");
    }

    let stopped = loop {
        tokio::select! {
            Some(notification) = fired.recv() => deliver(&service, &notification).await,
            result = tokio::signal::ctrl_c() => break result,
        }
    };

    // Timers die with the process; don't leave their ids behind in the store.
    for alarm in &armed {
        if let Err(error) = service.disarm(alarm.id).await {
            tracing::warn!("Failed to disarm alarm {}: {}", alarm.id, error);
        }
    }
    stopped?;
    Ok(())
}

/// Announce a fired notification and re-arm one-shot alarms after it
pub async fn deliver<S: NotificationScheduler>(
    service: &AlarmService<S>,
    notification: &FiredNotification,
) {
    println!(
        "[{}] {}",
        notification.fired_at.format("%Y-%m-%d %H:%M:%S"),
        notification.title
    );
    if notification.repeats {
        return;
    }

    let id = notification.alarm_id;
    match service.rearm(id, &notification.fired_at).await {
        Ok(Some(alarm)) => tracing::debug!("Re-armed alarm {} '{}'", alarm.id, alarm.name),
        Ok(None) => tracing::warn!("Alarm {} no longer exists; not re-arming", id),
        Err(error) => tracing::error!("Failed to re-arm alarm {}: {}", id, error),
    }
}
