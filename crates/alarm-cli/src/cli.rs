use std::path::PathBuf;

use alarm_core::schedule::TriggerStrategy;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "alarm")]
#[command(about = "Schedule local alarms from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new alarm
    #[command(alias = "new")]
    Add {
        /// Alarm label
        name: Vec<String>,
        /// Time of day, e.g. 07:30
        #[arg(long, value_name = "HH:MM")]
        at: String,
        /// Repeat days, e.g. "mon,wed,fri" or "2,4,6" (every day when omitted)
        #[arg(long, value_name = "DAYS")]
        days: Option<String>,
    },
    /// Change an existing alarm
    Edit {
        /// Alarm ID
        id: String,
        /// New label
        #[arg(long)]
        name: Option<String>,
        /// New time of day
        #[arg(long, value_name = "HH:MM")]
        at: Option<String>,
        /// New repeat days
        #[arg(long, value_name = "DAYS", conflicts_with = "every_day")]
        days: Option<String>,
        /// Repeat every day
        #[arg(long)]
        every_day: bool,
    },
    /// List alarms by time of day
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one alarm
    Show {
        /// Alarm ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an alarm
    Delete {
        /// Alarm ID
        id: String,
    },
    /// Print the seconds until a time of day next occurs
    Next {
        /// Time of day, e.g. 08:00
        at: String,
        /// Only consider these days
        #[arg(long, value_name = "DAYS")]
        days: Option<String>,
    },
    /// Arm every alarm and print them as they fire (Ctrl-C to stop)
    Run {
        /// How alarms are turned into triggers (defaults to the configured one)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Update the configuration file
    Set {
        /// Database file used when --db-path and ALARM_DB_PATH are unset
        #[arg(long, value_name = "PATH")]
        db_file: Option<PathBuf>,
        /// Default trigger strategy for `alarm run`
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Repeating daily/weekly triggers
    Calendar,
    /// One-shot countdown, re-armed after each alarm
    Interval,
}

impl From<StrategyArg> for TriggerStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Calendar => Self::Calendar,
            StrategyArg::Interval => Self::Interval,
        }
    }
}
