//! Internal domain models for the Last.fm binding.
//!
//! These types are OUR types - they don't change when the API changes.
//! All API responses get converted into these types by the adapter.

/// One entry of a user's recent-tracks listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrobble {
    /// Artist name as scrobbled
    pub artist: String,
    /// Track title
    pub track: String,
    /// Play time as the API renders it (e.g. "02 Jan 2006, 15:04").
    ///
    /// `None` for the now-playing entry and for old scrobbles that were
    /// stored without a date.
    pub played_at: Option<String>,
}

/// One page of the recent-tracks listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentTracksPage {
    /// 1-based page number
    pub page: u32,
    /// Number of pages the API reports for this query
    pub total_pages: u32,
    /// Number of scrobbles the API reports for this query
    pub total: u64,
    /// Entries on this page, in API order (newest first)
    pub tracks: Vec<Scrobble>,
}

/// Parameters for a recent-tracks request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentTracksQuery<'a> {
    pub user: &'a str,
    /// 1-based page number
    pub page: u32,
    /// Entries per page (the API caps this at 200)
    pub limit: u32,
    /// Only scrobbles at or after this Unix timestamp
    pub from: i64,
}

/// Errors from talking to Last.fm
#[derive(Debug, Clone, thiserror::Error)]
pub enum LastFmError {
    #[error("Last.fm API error {code}: {message}")]
    ApiError { code: i32, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("API contract violation: expected {expected}, got {actual}")]
    ContractViolation { expected: String, actual: String },
}
