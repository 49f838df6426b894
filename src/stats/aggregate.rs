//! Folding play events into the [`State`].
//!
//! [`absorb`] is the only thing that mutates a `State` during a run.
//! [`update`] drives a whole run: it remembers the watermark the run
//! started from, walks the history and absorbs every event newer than it.
//! Events at or before the starting watermark were counted by an earlier
//! run and are skipped, which is what makes re-running safe.

use std::pin::pin;

use futures::TryStreamExt;

use super::State;
use super::tags::resolve_tag;
use crate::error::Result;
use crate::history::{HistoryOptions, PlayEvent, play_events};
use crate::lastfm::{LastFmError, PlayHistoryApi, TagLookupApi};

/// What a run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Dated events the history yielded
    pub visited: u64,
    /// Events counted into the state
    pub absorbed: u64,
    /// Events already counted by an earlier run
    pub already_counted: u64,
    /// Artists whose tag had to be looked up
    pub new_artists: u64,
}

/// Count one play event.
///
/// Advances the watermark, resolves the artist's tag (looking it up only
/// the first time the artist is seen) and bumps the year's counters. The
/// track name is carried on the event but not counted.
pub async fn absorb<T>(state: &mut State, tags: &T, event: &PlayEvent) -> Result<(), LastFmError>
where
    T: TagLookupApi + ?Sized,
{
    state.advance_watermark(event.played_at);
    let tag = resolve_tag(&mut state.artist_tag, tags, &event.artist).await?;
    state.record_play(&tag, event.played_at);
    Ok(())
}

/// Absorb every play of `user` newer than the state's watermark.
///
/// Any history or lookup error aborts the run; the state may then hold a
/// partial update and should not be saved.
pub async fn update<H, T>(
    state: &mut State,
    history: &H,
    tags: &T,
    user: &str,
    options: HistoryOptions,
) -> Result<UpdateSummary>
where
    H: PlayHistoryApi + ?Sized,
    T: TagLookupApi + ?Sized,
{
    let since = state.most_recent_play;
    tracing::info!("Fetching plays for {} since {}", user, since.to_rfc3339());

    let mut summary = UpdateSummary::default();
    let mut events = pin!(play_events(history, user, since, options));

    while let Some(event) = events.try_next().await? {
        summary.visited += 1;

        if event.played_at <= since {
            summary.already_counted += 1;
            continue;
        }

        let known_artists = state.artist_tag.len();
        absorb(state, tags, &event).await?;
        if state.artist_tag.len() > known_artists {
            summary.new_artists += 1;
        }
        summary.absorbed += 1;
    }

    tracing::info!(
        "Counted {} new plays ({} already counted, {} new artists); watermark now {}",
        summary.absorbed,
        summary.already_counted,
        summary.new_artists,
        state.most_recent_play.to_rfc3339()
    );

    Ok(summary)
}
