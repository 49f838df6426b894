//! Offline report from the saved snapshot.

use crate::config::Settings;
use crate::error::ResultExt;
use crate::stats::{self, SnapshotStore};

use super::print_reports;

/// Print the top tags per year without contacting Last.fm
pub fn cmd_report(settings: &Settings) -> anyhow::Result<()> {
    let state = SnapshotStore::new(&settings.state_file)
        .load()
        .with_context("Loading snapshot")?;
    print_reports(&stats::report(&state, settings.top_threshold));
    Ok(())
}
