//! Tag Annals - top Last.fm tags per year of listening.
//!
//! Each run fetches the plays scrobbled since the previous run, tags every
//! artist with its top Last.fm tag, adds the plays to per-year counters kept
//! in a JSON snapshot, and prints each year's top tags by share of plays.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod lastfm;
pub mod stats;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs and progress go to stderr; stdout carries only the report
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tag_annals=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
