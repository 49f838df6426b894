//! Last.fm API binding - fetches scrobble history and artist tags.
//!
//! # Architecture
//!
//! Same layering as any other external source we talk to:
//! - **Domain models** (`domain.rs`) - Our types, stable across API changes
//! - **API DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`client.rs`) - HTTP client for ws.audioscrobbler.com
//! - **Traits** (`traits.rs`) - Seams for mocking the two endpoints we use
//!
//! Only two methods are used: `user.getRecentTracks` (paginated play
//! history) and `artist.getTopTags` (ranked tag list for an artist).
//!
//! API docs: https://www.last.fm/api

mod adapter;
mod client;
pub mod domain;
pub mod dto;
pub mod traits;

pub use client::LastFmClient;
pub use domain::{LastFmError, RecentTracksPage, RecentTracksQuery, Scrobble};
pub use traits::{PlayHistoryApi, TagLookupApi};
