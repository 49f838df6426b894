//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `update`: fetch new plays, save the snapshot, print the report
//! - `report`: print the report from the snapshot alone

mod report;
mod update;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{self, Overrides, Settings};
use crate::stats::YearReport;

pub use report::cmd_report;
pub use update::cmd_update;

/// Top Last.fm tags per year of listening
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub options: GlobalOptions,
}

/// Available subcommands; `update` when none is given
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Fetch new plays, save the snapshot and print the top tags per year
    Update,
    /// Print the top tags per year from the snapshot without fetching
    Report,
}

/// Flags shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Last.fm API secret
    #[arg(long, env = "LASTFM_API_SECRET", global = true, hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Last.fm user name
    #[arg(long, env = "LASTFM_USER", global = true)]
    pub user: Option<String>,

    /// Maximum number of tracks to process (-1 = unlimited)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub tracks_limit: Option<i64>,

    /// Show an indicator every K tracks processed (0 disables)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub tracks_per_indicator: Option<i64>,

    /// Scrobbles requested per page (max 200)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Top tags to print per year
    #[arg(long, global = true)]
    pub top_threshold: Option<usize>,

    /// Snapshot file holding the accumulated statistics
    #[arg(long = "state", global = true)]
    pub state_file: Option<PathBuf>,

    /// Config file (default: the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            user: self.user.clone(),
            tracks_limit: self.tracks_limit,
            tracks_per_indicator: self.tracks_per_indicator,
            page_size: self.page_size,
            top_threshold: self.top_threshold,
            state_file: self.state_file.clone(),
        }
    }

    /// Merge the flags with the config file.
    pub fn settings(&self) -> Settings {
        let file_config = match &self.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        Settings::resolve(file_config, self.overrides())
    }
}

/// Run the command selected on the command line.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli.options.settings();

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => {
            // Everything runs in sequence; one thread is all we need
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(cmd_update(&settings))
        }
        Commands::Report => cmd_report(&settings),
    }
}

/// Print one line per year to stdout
fn print_reports(reports: &[YearReport]) {
    for line in reports {
        println!("{}", line);
    }
}
