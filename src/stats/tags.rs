//! Artist -> tag resolution.
//!
//! Each artist is represented by a single tag: the top-ranked one Last.fm
//! reports, lowercased so "Rock" and "rock" land in the same bucket.
//! Resolutions are memoized in the caller's cache for the lifetime of the
//! [`State`](super::State), so each artist costs at most one lookup ever.

use std::collections::BTreeMap;

use crate::lastfm::{LastFmError, TagLookupApi};

/// Tag recorded for artists Last.fm has no tags for
pub const NO_TAG: &str = "(no tag)";

/// Normalize a tag for counting. Idempotent.
pub fn canonicalize_tag(raw: &str) -> String {
    raw.to_lowercase()
}

/// Resolve `artist` to its canonical tag, consulting `cache` first.
///
/// A lookup failure is returned as-is and leaves the cache untouched.
pub async fn resolve_tag<T>(
    cache: &mut BTreeMap<String, String>,
    lookup: &T,
    artist: &str,
) -> Result<String, LastFmError>
where
    T: TagLookupApi + ?Sized,
{
    if let Some(tag) = cache.get(artist) {
        return Ok(tag.clone());
    }

    let tags = lookup.artist_top_tags(artist).await?;
    let tag = match tags.first() {
        Some(top) => canonicalize_tag(top),
        None => NO_TAG.to_string(),
    };

    tracing::debug!("Resolved artist {:?} to tag {:?}", artist, tag);
    cache.insert(artist.to_string(), tag.clone());
    Ok(tag)
}
