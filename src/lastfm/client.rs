//! Last.fm HTTP client
//!
//! Handles communication with the Last.fm web service.
//! See: https://www.last.fm/api/intro
//!
//! ## API Quirks
//!
//! Errors come back as `{"error": <code>, "message": "..."}`, sometimes with
//! a 200 status and sometimes with a 4xx. We read the body once as text and
//! try the error shape before the expected one.

use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{adapter, dto};
use crate::lastfm::domain::{LastFmError, RecentTracksPage, RecentTracksQuery};

const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Last.fm API client
pub struct LastFmClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl LastFmClient {
    /// Create a new client with the given API key
    ///
    /// The read-only methods we call only need the key, not a session.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LastFmError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a different endpoint (proxies, tests)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LastFmError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LastFmError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one page of a user's scrobbles
    pub async fn recent_tracks(
        &self,
        query: &RecentTracksQuery<'_>,
    ) -> Result<RecentTracksPage, LastFmError> {
        let page = query.page.to_string();
        let limit = query.limit.to_string();
        let from = query.from.to_string();

        let response: dto::RecentTracksResponse = self
            .call(&[
                ("method", "user.getrecenttracks"),
                ("user", query.user),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
                ("from", from.as_str()),
            ])
            .await?;

        adapter::to_recent_tracks_page(response)
    }

    /// Fetch the ranked tag names for an artist
    pub async fn artist_top_tags(&self, artist: &str) -> Result<Vec<String>, LastFmError> {
        let response: dto::TopTagsResponse = self
            .call(&[("method", "artist.gettoptags"), ("artist", artist)])
            .await?;

        Ok(adapter::to_tag_names(response))
    }

    /// Send a GET request with the common parameters and decode the body
    async fn call<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, LastFmError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| LastFmError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LastFmError::RateLimited);
        }

        let body = response
            .text()
            .await
            .map_err(|e| LastFmError::Network(e.to_string()))?;

        decode_body(status, &body)
    }
}

/// Decode a response body, preferring the API's error payload if present
fn decode_body<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<T, LastFmError> {
    if let Ok(error) = serde_json::from_str::<dto::ApiError>(body) {
        // Error 29 is Last.fm's rate limit code
        if error.error == 29 {
            return Err(LastFmError::RateLimited);
        }
        return Err(LastFmError::ApiError {
            code: error.error,
            message: error.message,
        });
    }

    if !status.is_success() {
        return Err(LastFmError::Network(format!(
            "HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    serde_json::from_str(body).map_err(|e| LastFmError::Parse(e.to_string()))
}
