//! Trait definitions for the two Last.fm endpoints we depend on.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`LastFmClient`](super::LastFmClient), while tests
//! substitute the mocks below.

use async_trait::async_trait;

use super::domain::{LastFmError, RecentTracksPage, RecentTracksQuery};

/// Paginated play history (`user.getRecentTracks`).
#[async_trait]
pub trait PlayHistoryApi: Send + Sync {
    /// Fetch one page of scrobbles.
    async fn recent_tracks(
        &self,
        query: &RecentTracksQuery<'_>,
    ) -> Result<RecentTracksPage, LastFmError>;
}

/// Artist tag lookup (`artist.getTopTags`).
#[async_trait]
pub trait TagLookupApi: Send + Sync {
    /// Tag names for an artist, highest ranked first. May be empty.
    async fn artist_top_tags(&self, artist: &str) -> Result<Vec<String>, LastFmError>;
}

#[async_trait]
impl PlayHistoryApi for super::LastFmClient {
    async fn recent_tracks(
        &self,
        query: &RecentTracksQuery<'_>,
    ) -> Result<RecentTracksPage, LastFmError> {
        self.recent_tracks(query).await
    }
}

#[async_trait]
impl TagLookupApi for super::LastFmClient {
    async fn artist_top_tags(&self, artist: &str) -> Result<Vec<String>, LastFmError> {
        self.artist_top_tags(artist).await
    }
}
