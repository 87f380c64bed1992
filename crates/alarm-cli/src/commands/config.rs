use std::path::{Path, PathBuf};

use alarm_core::schedule::TriggerStrategy;

use crate::cli::StrategyArg;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config_show(db_path: &Path, config: &CliConfig) -> Result<(), CliError> {
    let config_path = default_config_path().map_err(CliError::Config)?;

    println!("config:   {}", config_path.display());
    println!("database: {}", db_path.display());
    println!("strategy: {}", strategy_label(config.strategy()));
    Ok(())
}

pub fn run_config_set(
    db_file: Option<PathBuf>,
    strategy: Option<StrategyArg>,
) -> Result<(), CliError> {
    let mut config = CliConfig::load().map_err(CliError::Config)?;
    apply_config_changes(&mut config, db_file, strategy);
    let path = config.save().map_err(CliError::Config)?;
    println!("{}", path.display());
    Ok(())
}

pub fn apply_config_changes(
    config: &mut CliConfig,
    db_file: Option<PathBuf>,
    strategy: Option<StrategyArg>,
) {
    if let Some(db_file) = db_file {
        config.db_path = Some(db_file);
    }
    if let Some(strategy) = strategy {
        config.trigger_strategy = Some(strategy.into());
    }
}

pub const fn strategy_label(strategy: TriggerStrategy) -> &'static str {
    match strategy {
        TriggerStrategy::Calendar => "calendar",
        TriggerStrategy::Interval => "interval",
    }
}
