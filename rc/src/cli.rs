//! CLI argument parsing for runcoach

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rc")]
#[command(author, version, about = "Strava mirror and training-plan coach", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch new runs from Strava into the local mirror
    Update {
        /// Number of weeks to look back (default from config)
        #[arg(short, long)]
        weeks: Option<u32>,
    },

    /// Print the training report from locally mirrored runs
    Report {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Analyze plan adherence: overview, completion, upcoming workouts
    Analyze {
        /// Plan ID to analyze
        #[arg(required = true)]
        plan_id: String,
    },

    /// List saved training plans
    Plans,

    /// List the tools exposed to the coaching agent
    Tools,
}

/// Output format for the report command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
