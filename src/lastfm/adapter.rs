//! Adapter layer: Convert Last.fm DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If Last.fm changes their response format, only this file and dto.rs
//! need to change.

use super::dto;
use crate::lastfm::domain::{LastFmError, RecentTracksPage, Scrobble};

/// Convert a recent-tracks response to a page of scrobbles
pub fn to_recent_tracks_page(
    response: dto::RecentTracksResponse,
) -> Result<RecentTracksPage, LastFmError> {
    let attr = response.recenttracks.attr;

    let tracks = response
        .recenttracks
        .track
        .into_iter()
        .map(to_scrobble)
        .collect();

    Ok(RecentTracksPage {
        page: parse_counter("page", &attr.page)?,
        total_pages: parse_counter("totalPages", &attr.total_pages)?,
        total: parse_counter("total", &attr.total)?,
        tracks,
    })
}

/// Convert a top-tags response to tag names, best first
pub fn to_tag_names(response: dto::TopTagsResponse) -> Vec<String> {
    response
        .toptags
        .tag
        .into_iter()
        .map(|tag| tag.name)
        .collect()
}

fn to_scrobble(track: dto::Track) -> Scrobble {
    // An empty date string means the same as no date at all
    let played_at = track
        .date
        .map(|date| date.text)
        .filter(|text| !text.trim().is_empty());

    Scrobble {
        artist: track.artist.text,
        track: track.name,
        played_at,
    }
}

/// Page counters come back as strings; anything non-numeric means the
/// response shape changed under us.
fn parse_counter<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, LastFmError> {
    raw.trim()
        .parse()
        .map_err(|_| LastFmError::ContractViolation {
            expected: format!("numeric {}", field),
            actual: format!("{:?}", raw),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str, name: &str, date: Option<&str>) -> dto::Track {
        dto::Track {
            artist: dto::TextWithMbid {
                text: artist.to_string(),
                mbid: None,
            },
            name: name.to_string(),
            album: None,
            mbid: None,
            url: None,
            date: date.map(|text| dto::TrackDate {
                uts: None,
                text: text.to_string(),
            }),
            attr: None,
        }
    }

    fn response(tracks: Vec<dto::Track>, total_pages: &str) -> dto::RecentTracksResponse {
        dto::RecentTracksResponse {
            recenttracks: dto::RecentTracks {
                track: tracks,
                attr: dto::PageAttr {
                    user: Some("listener".to_string()),
                    page: "2".to_string(),
                    per_page: Some("200".to_string()),
                    total_pages: total_pages.to_string(),
                    total: "450".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_page_counters_are_parsed() {
        let page = to_recent_tracks_page(response(vec![], "3")).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 450);
        assert!(page.tracks.is_empty());
    }

    #[test]
    fn test_scrobbles_keep_api_order() {
        let page = to_recent_tracks_page(response(
            vec![
                track("Newer", "B", Some("02 Jan 2020, 10:00")),
                track("Older", "A", Some("01 Jan 2020, 10:00")),
            ],
            "1",
        ))
        .unwrap();

        assert_eq!(page.tracks[0].artist, "Newer");
        assert_eq!(page.tracks[1].artist, "Older");
        assert_eq!(page.tracks[1].played_at.as_deref(), Some("01 Jan 2020, 10:00"));
    }

    #[test]
    fn test_missing_and_empty_dates_become_none() {
        let page = to_recent_tracks_page(response(
            vec![track("Now", "Playing", None), track("Legacy", "Entry", Some(""))],
            "1",
        ))
        .unwrap();

        assert!(page.tracks.iter().all(|t| t.played_at.is_none()));
    }

    #[test]
    fn test_non_numeric_counter_is_contract_violation() {
        let result = to_recent_tracks_page(response(vec![], "lots"));
        assert!(matches!(
            result,
            Err(LastFmError::ContractViolation { .. })
        ));
    }

    #[test]
    fn test_tag_names_keep_rank_order() {
        let response = dto::TopTagsResponse {
            toptags: dto::TopTags {
                tag: vec![
                    dto::Tag {
                        name: "Post-Rock".to_string(),
                        count: Some(100),
                        url: None,
                    },
                    dto::Tag {
                        name: "ambient".to_string(),
                        count: Some(20),
                        url: None,
                    },
                ],
                attr: None,
            },
        };

        assert_eq!(to_tag_names(response), vec!["Post-Rock", "ambient"]);
    }
}
