//! Incremental update: load, fetch new plays, save, report.

use crate::config::Settings;
use crate::error::{Result, ResultExt};
use crate::history::HistoryOptions;
use crate::lastfm::{LastFmClient, PlayHistoryApi, TagLookupApi};
use crate::stats::{self, SnapshotStore, YearReport};

use super::print_reports;

/// Count every play since the last run and print the top tags per year
pub async fn cmd_update(settings: &Settings) -> anyhow::Result<()> {
    let access = settings.lastfm_access()?;
    let store = SnapshotStore::new(&settings.state_file);
    let client = LastFmClient::new(&access.api_key).with_context("Creating Last.fm client")?;

    let reports = update_snapshot(
        &store,
        &client,
        &client,
        &access.user,
        settings.history,
        settings.top_threshold,
    )
    .await?;

    print_reports(&reports);
    Ok(())
}

/// Load the snapshot, absorb new plays, save and rank.
///
/// A failed save is only a warning: the freshly counted numbers are still
/// reported, they just won't be remembered next time.
pub async fn update_snapshot<H, T>(
    store: &SnapshotStore,
    history: &H,
    tags: &T,
    user: &str,
    options: HistoryOptions,
    top_threshold: usize,
) -> Result<Vec<YearReport>>
where
    H: PlayHistoryApi + ?Sized,
    T: TagLookupApi + ?Sized,
{
    let mut state = store.load().with_context("Loading snapshot")?;

    let summary = stats::update(&mut state, history, tags, user, options)
        .await
        .with_context(format!("Updating plays of {}", user))?;
    tracing::debug!("Run summary: {:?}", summary);

    if let Err(e) = store.save(&state) {
        tracing::warn!("Couldn't save state: {}", e);
    }

    Ok(stats::report(&state, top_threshold))
}
