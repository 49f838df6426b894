//! Play history as a lazy stream of dated play events.
//!
//! [`play_events`] walks the recent-tracks pages of a user from page 1 and
//! yields one [`PlayEvent`] per dated scrobble, in the order the API
//! returns them. It is restartable only by timestamp: `since` is passed to
//! the API as a hint, but events at or before it may still be yielded, so
//! consumers compare against their own watermark.
//!
//! Scrobbles without a date (now playing, some very old entries) are
//! skipped. A date that is present but doesn't parse ends the stream with
//! an error, since it means the API format changed.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDateTime, Utc};
use futures::Stream;

use crate::lastfm::{LastFmError, PlayHistoryApi, RecentTracksQuery, Scrobble};

/// Format of the `date.#text` field, e.g. "02 Jan 2006, 15:04" (UTC)
pub const PLAY_TIME_FORMAT: &str = "%d %b %Y, %H:%M";

/// Largest page size the recent-tracks endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 200;

/// A single dated play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEvent {
    pub artist: String,
    pub track: String,
    pub played_at: DateTime<Utc>,
}

/// How much of the history to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Stop after this many events; `Some(0)` visits nothing
    pub max_events: Option<u64>,
    /// Log progress every this many events
    pub progress_every: Option<u64>,
    /// Scrobbles requested per page
    pub page_size: u32,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_events: None,
            progress_every: Some(1000),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Errors that end the event stream
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to fetch play history: {0}")]
    Api(#[from] LastFmError),

    #[error("Unparseable play time {text:?}: {source}")]
    InvalidPlayTime {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parse a play time as rendered by the API
pub fn parse_play_time(text: &str) -> Result<DateTime<Utc>, HistoryError> {
    NaiveDateTime::parse_from_str(text.trim(), PLAY_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| HistoryError::InvalidPlayTime {
            text: text.to_string(),
            source,
        })
}

/// Stream the dated plays of `user`, starting from page 1.
pub fn play_events<'a, H>(
    api: &'a H,
    user: &'a str,
    since: DateTime<Utc>,
    options: HistoryOptions,
) -> impl Stream<Item = Result<PlayEvent, HistoryError>> + 'a
where
    H: PlayHistoryApi + ?Sized + 'a,
{
    let cursor = Cursor {
        user,
        from: since.timestamp(),
        options,
        next_page: 1,
        total_pages: None,
        total: 0,
        buffered: VecDeque::new(),
        visited: 0,
    };

    futures::stream::try_unfold(cursor, move |cursor| cursor.advance(api))
}

/// Position within the paginated history
struct Cursor<'a> {
    user: &'a str,
    from: i64,
    options: HistoryOptions,
    next_page: u32,
    /// Unknown until the first page arrives
    total_pages: Option<u32>,
    total: u64,
    buffered: VecDeque<Scrobble>,
    visited: u64,
}

impl<'a> Cursor<'a> {
    async fn advance<H>(mut self, api: &H) -> Result<Option<(PlayEvent, Self)>, HistoryError>
    where
        H: PlayHistoryApi + ?Sized,
    {
        loop {
            if self.options.max_events.is_some_and(|max| self.visited >= max) {
                return Ok(None);
            }

            if let Some(scrobble) = self.buffered.pop_front() {
                let Some(text) = scrobble.played_at else {
                    continue;
                };
                let event = PlayEvent {
                    played_at: parse_play_time(&text)?,
                    artist: scrobble.artist,
                    track: scrobble.track,
                };
                self.visited += 1;
                self.report_progress();
                return Ok(Some((event, self)));
            }

            if self
                .total_pages
                .is_some_and(|total_pages| self.next_page > total_pages)
            {
                return Ok(None);
            }

            self.fetch_next_page(api).await?;
        }
    }

    async fn fetch_next_page<H>(&mut self, api: &H) -> Result<(), HistoryError>
    where
        H: PlayHistoryApi + ?Sized,
    {
        let query = RecentTracksQuery {
            user: self.user,
            page: self.next_page,
            limit: self.options.page_size,
            from: self.from,
        };
        let page = api.recent_tracks(&query).await?;

        tracing::debug!(
            "Fetched page {}/{} ({} entries)",
            page.page,
            page.total_pages,
            page.tracks.len()
        );

        self.total_pages = Some(page.total_pages);
        self.total = page.total;
        self.buffered = page.tracks.into();
        self.next_page += 1;
        Ok(())
    }

    fn report_progress(&self) {
        if progress_due(self.visited, self.options.progress_every) {
            tracing::info!("Considered {:7}/{:7} tracks", self.visited, self.total);
        }
    }
}

/// Whether the `visited`-th event is a progress point
fn progress_due(visited: u64, every: Option<u64>) -> bool {
    every.is_some_and(|every| every > 0 && visited > 0 && visited % every == 0)
}
