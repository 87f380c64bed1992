//! alarm CLI - schedule local alarms from the terminal
//!
//! Alarms live in a local `SQLite` file; `alarm run` keeps them firing.

mod cli;
mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use std::env;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::add::run_add;
use crate::commands::completions::run_completions;
use crate::commands::config::{run_config_set, run_config_show};
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditArgs};
use crate::commands::list::run_list;
use crate::commands::next::run_next;
use crate::commands::run::run_scheduler;
use crate::commands::show::run_show;
use crate::config::{resolve_db_path, CliConfig, DB_PATH_ENV};
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "alarm_core=info,alarm_cli=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load().map_err(CliError::Config)?;
    let db_path = resolve_db_path(
        cli.db_path,
        env::var_os(DB_PATH_ENV).map(PathBuf::from),
        &config,
    )
    .map_err(CliError::Config)?;

    match cli.command {
        Some(Commands::Add { name, at, days }) => {
            run_add(&name, &at, days.as_deref(), &db_path).await?;
        }
        Some(Commands::Edit {
            id,
            name,
            at,
            days,
            every_day,
        }) => {
            let args = EditArgs {
                id: &id,
                name: name.as_deref(),
                at: at.as_deref(),
                days: days.as_deref(),
                every_day,
            };
            run_edit(args, &db_path).await?;
        }
        Some(Commands::List { json }) => run_list(json, &db_path).await?,
        Some(Commands::Show { id, json }) => run_show(&id, json, &db_path).await?,
        Some(Commands::Delete { id }) => run_delete(&id, &db_path).await?,
        Some(Commands::Next { at, days }) => run_next(&at, days.as_deref())?,
        Some(Commands::Run { strategy }) => {
            let strategy = strategy.map_or_else(|| config.strategy(), Into::into);
            run_scheduler(strategy, &db_path).await?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => run_config_show(&db_path, &config)?,
            ConfigCommands::Set { db_file, strategy } => run_config_set(db_file, strategy)?,
        },
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
