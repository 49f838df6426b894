//! Test utilities and fixtures for tag-annals tests.
//!
//! Common builders for scrobbles, play times and snapshot locations, so
//! individual tests stay focused on the behavior under test.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{scrobble, temp_snapshot};
//!
//! let history = MockHistory::paged(vec![scrobble("Can", "Vitamin C", "01 Jan 1972, 12:00")], 200);
//! let (store, _dir) = temp_snapshot();
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use tempfile::TempDir;

use crate::history::PlayEvent;
use crate::lastfm::Scrobble;
use crate::stats::SnapshotStore;

/// A UTC timestamp with minute precision, like the API provides.
pub fn played(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test date")
        .and_utc()
}

/// A dated scrobble as the adapter produces it.
pub fn scrobble(artist: &str, track: &str, date: &str) -> Scrobble {
    Scrobble {
        artist: artist.to_string(),
        track: track.to_string(),
        played_at: Some(date.to_string()),
    }
}

/// A scrobble without a date (now playing or legacy entry).
pub fn undated(artist: &str, track: &str) -> Scrobble {
    Scrobble {
        artist: artist.to_string(),
        track: track.to_string(),
        played_at: None,
    }
}

/// A play event at noon on January 1st of `year`, plus `minute` minutes.
pub fn event(artist: &str, year: i32, minute: u32) -> PlayEvent {
    PlayEvent {
        artist: artist.to_string(),
        track: format!("{} track", artist),
        played_at: played(year, 1, 1, 12, minute),
    }
}

/// Render a play time the way the API does.
pub fn api_date(at: DateTime<Utc>) -> String {
    at.format(crate::history::PLAY_TIME_FORMAT).to_string()
}

/// A snapshot store inside a fresh temporary directory.
///
/// Keep the `TempDir` alive for the duration of the test; the snapshot
/// file doesn't exist until the first save.
pub fn temp_snapshot() -> (SnapshotStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = SnapshotStore::new(dir.path().join("state.json"));
    (store, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_date_round_trips_through_parser() {
        let at = played(2021, 3, 9, 7, 5);
        assert_eq!(api_date(at), "09 Mar 2021, 07:05");
        assert_eq!(crate::history::parse_play_time(&api_date(at)).unwrap(), at);
    }

    #[test]
    fn test_temp_snapshot_starts_empty() {
        let (store, _dir) = temp_snapshot();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_event_defaults() {
        let e = event("Can", 1972, 3);
        assert_eq!(e.track, "Can track");
        assert_eq!(e.played_at, played(1972, 1, 1, 12, 3));
    }
}
