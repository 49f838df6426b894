//! Command-line interface for tag-annals.
//!
//! Thin layer over the library modules: parses flags, merges them with the
//! config file and runs one command.

mod commands;

pub use commands::{Cli, Commands, run_command};
