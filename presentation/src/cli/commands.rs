//! CLI command definitions

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use stamp_domain::SubjectId;
use std::path::PathBuf;

/// Output format for engine results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when the terminal supports it
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for stamp-quorum
#[derive(Parser, Debug)]
#[command(name = "stamp-quorum")]
#[command(author, version, about = "Vote-driven moderation engine for stamps")]
#[command(long_about = r#"
Stamp Quorum concludes community votes on stamps.

A stamp is concluded once its total voting power and its majority share both
reach the configured thresholds. An upvoter majority accepts it (archiving any
previously accepted sibling), a downvoter majority denies it, and anything
else puts it in dispute.

Configuration is loaded from (in priority order):
1. VOTABLE_POWER_THRESHOLD / VOTABLE_MAJORITY_THRESHOLD / STAMP_CONCLUDE_IN_HOURS
2. --config <path>          Explicit config file
3. ./stamp-quorum.toml      Project-level config
4. ~/.config/stamp-quorum/config.toml   Global config

Example:
  stamp-quorum evaluate scenario.json 1
  stamp-quorum conclude scenario.json
  stamp-quorum --output json sweep scenario.json --now 2024-03-01T00:00:00Z
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment still applies)
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and issues, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print tally, majority and concludability of one stamp
    Evaluate {
        /// Scenario file (JSON)
        scenario: PathBuf,
        /// Stamp to evaluate
        subject: SubjectId,
    },

    /// Conclude stamps and apply the resulting tasks
    Conclude {
        /// Scenario file (JSON)
        scenario: PathBuf,
        /// Stamps to conclude (default: every in-progress stamp)
        subjects: Vec<SubjectId>,
    },

    /// Conclude every stamp that has been in progress too long
    Sweep {
        /// Scenario file (JSON)
        scenario: PathBuf,
        /// Point in time to sweep at, RFC 3339 (default: now)
        #[arg(long, value_name = "RFC3339")]
        now: Option<DateTime<Utc>>,
    },
}

impl Command {
    pub fn scenario(&self) -> &PathBuf {
        match self {
            Command::Evaluate { scenario, .. }
            | Command::Conclude { scenario, .. }
            | Command::Sweep { scenario, .. } => scenario,
        }
    }
}
