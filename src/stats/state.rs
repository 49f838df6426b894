//! The durable aggregate: per-year tag counts, per-year play totals, the
//! artist tag cache and the watermark.
//!
//! The serde attributes define the snapshot schema. Field names are the
//! PascalCase names older snapshot files use, years are written as decimal
//! string keys (serde_json does this for integer map keys) and the
//! watermark is RFC 3339.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// One tag's play count within a year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagAndCount {
    pub name: String,
    pub count: u64,
}

/// Tag name -> count, for one year
pub type TagCounts = BTreeMap<String, TagAndCount>;

/// Year -> tag counts
pub type AnnualCounts = BTreeMap<i32, TagCounts>;

/// Everything a run needs to resume where the last one stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct State {
    /// Artist -> canonical tag. Entries are never overwritten.
    #[serde(default)]
    pub artist_tag: BTreeMap<String, String>,
    #[serde(default)]
    pub alltime: AnnualCounts,
    /// Year -> plays counted that year
    #[serde(default)]
    pub annual_plays: BTreeMap<i32, u64>,
    pub min_year: i32,
    pub max_year: i32,
    /// Plays at or before this instant are already counted
    pub most_recent_play: DateTime<Utc>,
}

impl State {
    /// A fresh state whose year range is just `year`.
    pub fn starting_in(year: i32) -> Self {
        Self {
            artist_tag: BTreeMap::new(),
            alltime: AnnualCounts::new(),
            annual_plays: BTreeMap::new(),
            min_year: year,
            max_year: year,
            most_recent_play: DateTime::UNIX_EPOCH,
        }
    }

    /// Move the watermark forward to `played_at` if it is newer.
    pub fn advance_watermark(&mut self, played_at: DateTime<Utc>) {
        if played_at > self.most_recent_play {
            self.most_recent_play = played_at;
        }
    }

    /// Count one play of `tag` in the year of `played_at`.
    pub fn record_play(&mut self, tag: &str, played_at: DateTime<Utc>) {
        let year = played_at.year();
        self.min_year = self.min_year.min(year);
        self.max_year = self.max_year.max(year);

        *self.annual_plays.entry(year).or_insert(0) += 1;

        self.alltime
            .entry(year)
            .or_default()
            .entry(tag.to_string())
            .and_modify(|tc| tc.count += 1)
            .or_insert_with(|| TagAndCount {
                name: tag.to_string(),
                count: 1,
            });
    }

    /// Every year from the first to the last observed, gaps included.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.min_year..=self.max_year
    }

    /// Plays counted in `year` (zero if none).
    pub fn plays_in(&self, year: i32) -> u64 {
        self.annual_plays.get(&year).copied().unwrap_or(0)
    }

    /// Tag counts for `year`, if any plays were counted.
    pub fn tag_counts(&self, year: i32) -> Option<&TagCounts> {
        self.alltime.get(&year)
    }

    /// Total plays across all years.
    pub fn total_plays(&self) -> u64 {
        self.annual_plays.values().sum()
    }
}

impl Default for State {
    /// Fresh state for the current calendar year
    fn default() -> Self {
        Self::starting_in(Utc::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::played;

    /// Every year's play total matches the sum of its tag counts.
    fn totals_match(state: &State) -> bool {
        state.years().all(|year| {
            let tagged: u64 = state
                .tag_counts(year)
                .map(|counts| counts.values().map(|tc| tc.count).sum())
                .unwrap_or(0);
            tagged == state.plays_in(year)
        })
    }

    #[test]
    fn test_fresh_state() {
        let state = State::starting_in(2024);
        assert_eq!(state.years(), 2024..=2024);
        assert_eq!(state.most_recent_play.timestamp(), 0);
        assert!(state.artist_tag.is_empty());
        assert_eq!(state.total_plays(), 0);
    }

    #[test]
    fn test_default_uses_current_year() {
        let state = State::default();
        let year = Utc::now().year();
        assert_eq!(state.min_year, year);
        assert_eq!(state.max_year, year);
    }

    #[test]
    fn test_record_play_creates_then_increments() {
        let mut state = State::starting_in(2020);
        state.record_play("rock", played(2020, 5, 1, 9, 0));
        state.record_play("rock", played(2020, 6, 1, 9, 0));
        state.record_play("jazz", played(2020, 7, 1, 9, 0));

        let counts = state.tag_counts(2020).unwrap();
        assert_eq!(counts["rock"].count, 2);
        assert_eq!(counts["rock"].name, "rock");
        assert_eq!(counts["jazz"].count, 1);
        assert_eq!(state.plays_in(2020), 3);
        assert!(totals_match(&state));
    }

    #[test]
    fn test_record_play_widens_year_range() {
        let mut state = State::starting_in(2020);
        state.record_play("rock", played(2017, 1, 1, 0, 0));
        state.record_play("rock", played(2022, 12, 31, 23, 59));
        assert_eq!(state.years(), 2017..=2022);
        assert_eq!(state.plays_in(2019), 0);
        assert!(state.tag_counts(2019).is_none());
    }

    #[test]
    fn test_watermark_only_moves_forward() {
        let mut state = State::starting_in(2020);
        state.advance_watermark(played(2020, 3, 1, 0, 0));
        state.advance_watermark(played(2020, 1, 1, 0, 0));
        assert_eq!(state.most_recent_play, played(2020, 3, 1, 0, 0));
    }

    #[test]
    fn test_snapshot_schema() {
        let mut state = State::starting_in(2020);
        state.artist_tag.insert("Can".to_string(), "krautrock".to_string());
        state.record_play("krautrock", played(2020, 1, 2, 3, 4));
        state.advance_watermark(played(2020, 1, 2, 3, 4));

        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["ArtistTag"]["Can"], "krautrock");
        assert_eq!(json["Alltime"]["2020"]["krautrock"]["Name"], "krautrock");
        assert_eq!(json["Alltime"]["2020"]["krautrock"]["Count"], 1);
        assert_eq!(json["AnnualPlays"]["2020"], 1);
        assert_eq!(json["MinYear"], 2020);
        assert_eq!(json["MaxYear"], 2020);
        assert_eq!(json["MostRecentPlay"], "2020-01-02T03:04:00Z");
    }

    #[test]
    fn test_reads_existing_snapshot_layout() {
        let json = r#"{
            "ArtistTag": {"Miles Davis": "jazz"},
            "Alltime": {"2019": {"jazz": {"Name": "jazz", "Count": 2}}},
            "AnnualPlays": {"2019": 2},
            "MinYear": 2019,
            "MaxYear": 2021,
            "MostRecentPlay": "2019-12-31T13:46:00Z"
        }"#;

        let state: State = serde_json::from_str(json).unwrap();
        assert_eq!(state.artist_tag["Miles Davis"], "jazz");
        assert_eq!(state.plays_in(2019), 2);
        assert_eq!(state.years(), 2019..=2021);
        assert_eq!(state.most_recent_play, played(2019, 12, 31, 13, 46));
        assert!(totals_match(&state));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn play() -> impl Strategy<Value = (String, DateTime<Utc>)> {
            (
                prop::sample::select(vec!["rock", "jazz", "dub", "(no tag)"]),
                // 2000-01-01 .. 2030-01-01
                946_684_800i64..1_893_456_000i64,
            )
                .prop_map(|(tag, secs)| {
                    (
                        tag.to_string(),
                        DateTime::from_timestamp(secs, 0).expect("in range"),
                    )
                })
        }

        proptest! {
            /// Per-year totals always equal the sum of that year's tag counts
            #[test]
            fn totals_equal_tag_sums(plays in prop::collection::vec(play(), 0..200)) {
                let mut state = State::starting_in(2015);
                for (tag, at) in &plays {
                    state.advance_watermark(*at);
                    state.record_play(tag, *at);
                }
                prop_assert!(totals_match(&state));
                prop_assert_eq!(state.total_plays(), plays.len() as u64);
            }

            /// The watermark ends at the newest play regardless of order
            #[test]
            fn watermark_is_max(plays in prop::collection::vec(play(), 1..100)) {
                let mut state = State::starting_in(2015);
                for (_, at) in &plays {
                    state.advance_watermark(*at);
                }
                let newest = plays.iter().map(|(_, at)| *at).max().unwrap();
                prop_assert_eq!(state.most_recent_play, newest);
            }

            /// Counting order doesn't change the result
            #[test]
            fn counting_is_order_independent(plays in prop::collection::vec(play(), 0..100)) {
                let mut forward = State::starting_in(2015);
                let mut backward = State::starting_in(2015);
                for (tag, at) in &plays {
                    forward.advance_watermark(*at);
                    forward.record_play(tag, *at);
                }
                for (tag, at) in plays.iter().rev() {
                    backward.advance_watermark(*at);
                    backward.record_play(tag, *at);
                }
                prop_assert_eq!(forward, backward);
            }
        }
    }
}
