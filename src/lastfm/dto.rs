//! Last.fm API Data Transfer Objects
//!
//! These types match EXACTLY what the Last.fm JSON API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the lastfm module - convert to domain types.
//!
//! Quirks worth knowing:
//! - Text content lives under a `#text` key and attributes under `@attr`
//!   (the JSON is a mechanical translation of the XML API).
//! - Page counters are strings, not numbers.
//! - A list with exactly one element may be returned as a bare object.
//!
//! API Reference: https://www.last.fm/api/show/user.getRecentTracks
//! and https://www.last.fm/api/show/artist.getTopTags

use serde::{Deserialize, Deserializer, Serialize};

/// `user.getRecentTracks` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecentTracks {
    #[serde(default, deserialize_with = "one_or_many")]
    pub track: Vec<Track>,
    #[serde(rename = "@attr")]
    pub attr: PageAttr,
}

/// Paging info, all numeric values encoded as strings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageAttr {
    pub user: Option<String>,
    pub page: String,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    #[serde(rename = "totalPages")]
    pub total_pages: String,
    pub total: String,
}

/// A scrobbled track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub artist: TextWithMbid,
    pub name: String,
    pub album: Option<TextWithMbid>,
    pub mbid: Option<String>,
    pub url: Option<String>,
    /// Absent on the now-playing entry
    pub date: Option<TrackDate>,
    #[serde(rename = "@attr")]
    pub attr: Option<TrackAttr>,
}

/// Text node with an optional MusicBrainz ID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextWithMbid {
    #[serde(rename = "#text", default)]
    pub text: String,
    pub mbid: Option<String>,
}

/// Play time of a scrobble
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackDate {
    /// Unix timestamp as a string
    pub uts: Option<String>,
    /// Human-readable form, e.g. "02 Jan 2006, 15:04"
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackAttr {
    pub nowplaying: Option<String>,
}

/// `artist.getTopTags` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopTagsResponse {
    pub toptags: TopTags,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopTags {
    /// Ranked by count, highest first
    #[serde(default, deserialize_with = "one_or_many")]
    pub tag: Vec<Tag>,
    #[serde(rename = "@attr")]
    pub attr: Option<TopTagsAttr>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    pub count: Option<u32>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopTagsAttr {
    pub artist: Option<String>,
}

/// Error payload, returned with either a 200 or a 4xx status
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: i32,
    pub message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
