use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alarm_core::notify::{InProcessScheduler, MonotonicClock};
use alarm_core::schedule::TriggerStrategy;
use alarm_core::services::{AlarmService, AlarmStore};
use alarm_core::{Alarm, AlarmId, AlarmTime, DayOfWeek};
use chrono::{Local, TimeDelta, TimeZone};
use clap::{CommandFactory, Parser};
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, StrategyArg};
use crate::commands::add::run_add;
use crate::commands::common::{
    alarm_to_list_item, format_alarm_lines, format_countdown, format_repeat, normalize_name,
    parse_alarm_id, parse_days,
};
use crate::commands::config::{apply_config_changes, strategy_label};
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditArgs};
use crate::commands::run::deliver;
use crate::commands::show::run_show;
use crate::config::{resolve_db_path, CliConfig};
use crate::error::CliError;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn edit_rejects_days_with_every_day() {
    let parsed = Cli::try_parse_from(["alarm", "edit", "3", "--days", "mon", "--every-day"]);
    assert!(parsed.is_err());
}

#[test]
fn add_collects_multi_word_name() {
    let cli = Cli::try_parse_from(["alarm", "add", "Take", "pills", "--at", "21:00"]).unwrap();
    match cli.command {
        Some(Commands::Add { name, at, days }) => {
            assert_eq!(name, vec!["Take", "pills"]);
            assert_eq!(at, "21:00");
            assert!(days.is_none());
        }
        _ => panic!("expected add command"),
    }
}

#[test]
fn normalize_name_collapses_whitespace_and_rejects_empty() {
    assert_eq!(normalize_name("  Wake   up ").unwrap(), "Wake up");
    assert!(matches!(normalize_name(" \t "), Err(CliError::EmptyName)));
}

#[test]
fn parse_alarm_id_requires_positive_integer() {
    assert_eq!(parse_alarm_id(" 12 ").unwrap(), AlarmId::new(12));
    assert!(matches!(parse_alarm_id("0"), Err(CliError::InvalidAlarmId(_))));
    assert!(matches!(parse_alarm_id("-3"), Err(CliError::InvalidAlarmId(_))));
    assert!(matches!(parse_alarm_id("abc"), Err(CliError::InvalidAlarmId(_))));
}

#[test]
fn parse_days_accepts_names_and_indices() {
    assert!(parse_days(None).unwrap().is_empty());
    assert_eq!(
        parse_days(Some("mon,4,fri")).unwrap(),
        vec![DayOfWeek::MONDAY, DayOfWeek::WEDNESDAY, DayOfWeek::FRIDAY]
    );
    assert!(parse_days(Some("mon,blursday")).is_err());
}

#[test]
fn format_countdown_units() {
    assert_eq!(format_countdown(45), "45s");
    assert_eq!(format_countdown(120), "2m");
    assert_eq!(format_countdown(61_200), "17h 0m");
    assert_eq!(format_countdown(90_000), "1d 1h");
}

#[test]
fn format_repeat_sorts_and_dedups() {
    assert_eq!(format_repeat(&[]), "every day");
    assert_eq!(
        format_repeat(&[DayOfWeek::FRIDAY, DayOfWeek::MONDAY, DayOfWeek::FRIDAY]),
        "Mon,Fri"
    );
}

#[test]
fn list_item_reports_next_fire() {
    let now = Local.with_ymd_and_hms(2024, 1, 1, 7, 59, 0).unwrap();
    let mut alarm = Alarm::new("Coffee", AlarmTime::new(8, 0).unwrap());
    alarm.id = AlarmId::new(4);

    let item = alarm_to_list_item(&alarm, &now);
    assert_eq!(item.id, 4);
    assert_eq!(item.time, "08:00");
    assert_eq!(item.repeat, "every day");
    assert_eq!(item.seconds_until_next, 60);
    assert!(item.weekdays.is_empty());
}

#[test]
fn alarm_lines_include_key_fields() {
    let now = Local.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    let mut alarm = Alarm::new("Standup", AlarmTime::new(9, 15).unwrap())
        .with_weekdays([DayOfWeek::MONDAY]);
    alarm.id = AlarmId::new(2);

    let lines = format_alarm_lines(&[alarm], &now);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("09:15"));
    assert!(lines[0].contains("Standup"));
    assert!(lines[0].contains("Mon"));
    assert!(lines[0].contains("in 2h 15m"));
}

#[test]
fn resolve_db_path_precedence() {
    let config = CliConfig {
        db_path: Some(PathBuf::from("/config/alarm.db")),
        ..CliConfig::default()
    };

    let flag = resolve_db_path(
        Some(PathBuf::from("/flag.db")),
        Some(PathBuf::from("/env.db")),
        &config,
    )
    .unwrap();
    assert_eq!(flag, PathBuf::from("/flag.db"));

    let env = resolve_db_path(None, Some(PathBuf::from("/env.db")), &config).unwrap();
    assert_eq!(env, PathBuf::from("/env.db"));

    let configured = resolve_db_path(None, None, &config).unwrap();
    assert_eq!(configured, PathBuf::from("/config/alarm.db"));
}

#[test]
fn config_round_trips_through_file() {
    let path = unique_test_path("config", "json");
    let mut config = CliConfig::default();
    apply_config_changes(
        &mut config,
        Some(PathBuf::from("/data/alarm.db")),
        Some(StrategyArg::Interval),
    );
    config.save_to_path(&path).unwrap();

    let loaded = CliConfig::load_from_path(&path).unwrap();
    assert_eq!(loaded.db_path, Some(PathBuf::from("/data/alarm.db")));
    assert_eq!(loaded.strategy(), TriggerStrategy::Interval);
    assert_eq!(loaded.version, 1);
    assert_eq!(strategy_label(loaded.strategy()), "interval");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_config_file_yields_defaults() {
    let loaded = CliConfig::load_from_path(&unique_test_path("absent", "json")).unwrap();
    assert_eq!(loaded.db_path, None);
    assert_eq!(loaded.strategy(), TriggerStrategy::Calendar);
}

#[tokio::test(flavor = "current_thread")]
async fn add_edit_delete_round_trip() {
    let db_path = unique_test_path("crud", "db");

    run_add(
        &["Wake".to_string(), "up".to_string()],
        "6:30",
        Some("mon,tue"),
        &db_path,
    )
    .await
    .unwrap();

    let store = AlarmStore::open_path(&db_path).await.unwrap();
    let alarms = store.list().await.unwrap();
    assert_eq!(alarms.len(), 1);
    let id = alarms[0].id;
    assert_eq!(alarms[0].name, "Wake up");
    assert_eq!(alarms[0].time, AlarmTime::new(6, 30).unwrap());
    assert_eq!(
        alarms[0].weekdays,
        vec![DayOfWeek::MONDAY, DayOfWeek::TUESDAY]
    );
    drop(store);

    let id_text = id.to_string();
    run_edit(
        EditArgs {
            id: &id_text,
            name: Some("Get up"),
            at: Some("07:00"),
            days: None,
            every_day: true,
        },
        &db_path,
    )
    .await
    .unwrap();

    let store = AlarmStore::open_path(&db_path).await.unwrap();
    let edited = store.get(id).await.unwrap().unwrap();
    assert_eq!(edited.name, "Get up");
    assert_eq!(edited.time, AlarmTime::new(7, 0).unwrap());
    assert!(edited.weekdays.is_empty());
    assert_eq!(store.list().await.unwrap().len(), 1);
    drop(store);

    run_delete(&id_text, &db_path).await.unwrap();
    // Deleting a missing alarm is not an error
    run_delete(&id_text, &db_path).await.unwrap();

    let store = AlarmStore::open_path(&db_path).await.unwrap();
    assert!(store.get(id).await.unwrap().is_none());
    drop(store);

    cleanup_db_files(&db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn edit_requires_a_change() {
    let db_path = unique_test_path("edit", "db");
    let result = run_edit(
        EditArgs {
            id: "1",
            name: None,
            at: None,
            days: None,
            every_day: false,
        },
        &db_path,
    )
    .await;
    assert!(matches!(result, Err(CliError::NothingToEdit)));
    cleanup_db_files(&db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn show_missing_alarm_is_an_error() {
    let db_path = unique_test_path("show", "db");
    let result = run_show("42", false, &db_path).await;
    assert!(matches!(result, Err(CliError::AlarmNotFound(id)) if id == AlarmId::new(42)));
    cleanup_db_files(&db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn add_rejects_invalid_time() {
    let db_path = unique_test_path("invalid", "db");
    let result = run_add(&["Late".to_string()], "24:00", None, &db_path).await;
    assert!(matches!(
        result,
        Err(CliError::Core(alarm_core::Error::InvalidInput(_)))
    ));
    cleanup_db_files(&db_path);
}

#[tokio::test(start_paused = true)]
async fn interval_alarm_fires_once_per_occurrence() {
    // 3599.4 s before 08:00 on Monday 2024-01-01
    let origin =
        Local.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap() + TimeDelta::milliseconds(600);
    let store = AlarmStore::open_in_memory().await.unwrap();
    let (scheduler, mut fired) =
        InProcessScheduler::with_clock(MonotonicClock::starting_at(origin));
    let service = AlarmService::new(store, scheduler, TriggerStrategy::Interval);

    let alarm = Alarm::new("Wake", AlarmTime::new(8, 0).unwrap());
    let armed = service.arm_at(alarm, &origin).await.unwrap();

    let first = fired.recv().await.unwrap();
    let first_due = Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    assert!(first.fired_at >= first_due, "fired early at {}", first.fired_at);
    assert!(first.fired_at < first_due + TimeDelta::seconds(1));
    assert!(!first.repeats);
    deliver(&service, &first).await;

    let again = tokio::time::timeout(Duration::from_secs(23 * 3600), fired.recv()).await;
    assert!(again.is_err(), "alarm fired twice for one occurrence");

    let second = fired.recv().await.unwrap();
    let second_due = Local.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
    assert!(second.fired_at >= second_due, "fired early at {}", second.fired_at);
    assert!(second.fired_at < second_due + TimeDelta::seconds(2));

    let stored = service.store().get(armed.id).await.unwrap().unwrap();
    assert_eq!(stored.notification_ids.len(), 1);
    assert_ne!(stored.notification_ids, armed.notification_ids);
}

#[tokio::test(start_paused = true)]
async fn deliver_skips_deleted_alarm() {
    let origin = Local.with_ymd_and_hms(2024, 1, 1, 7, 59, 0).unwrap();
    let store = AlarmStore::open_in_memory().await.unwrap();
    let (scheduler, mut fired) =
        InProcessScheduler::with_clock(MonotonicClock::starting_at(origin));
    let service = AlarmService::new(store, scheduler, TriggerStrategy::Interval);

    let alarm = Alarm::new("Gone", AlarmTime::new(8, 0).unwrap());
    let armed = service.arm_at(alarm, &origin).await.unwrap();
    let notification = fired.recv().await.unwrap();
    service.store().delete(armed.id).await.unwrap();

    deliver(&service, &notification).await;

    let again = tokio::time::timeout(Duration::from_secs(2 * 86_400), fired.recv()).await;
    assert!(again.is_err());
    assert!(service.store().list().await.unwrap().is_empty());
}

fn unique_test_path(label: &str, extension: &str) -> PathBuf {
    static NEXT_TEST_ID: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let sequence = NEXT_TEST_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "alarm-cli-{label}-test-{timestamp}-{sequence}.{extension}"
    ))
}

fn cleanup_db_files(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(file));
    }
}
