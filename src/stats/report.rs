//! Top tags per year, as a share of that year's plays.

use std::fmt;

use super::{State, TagAndCount, TagCounts};

/// Default number of tags shown per year
pub const DEFAULT_TOP_THRESHOLD: usize = 5;

/// One ranked tag in a year
#[derive(Debug, Clone, PartialEq)]
pub struct TagShare {
    pub name: String,
    pub count: u64,
    /// Percentage of the year's plays, 0.0 when the year has none
    pub percent: f64,
}

/// The ranked tags of one year
#[derive(Debug, Clone, PartialEq)]
pub struct YearReport {
    pub year: i32,
    pub plays: u64,
    pub top: Vec<TagShare>,
}

impl fmt::Display for YearReport {
    /// `2020: rock (66.7), jazz (33.3)`; `2020: ` for a year without tags
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.year)?;
        for (i, share) in self.top.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({:.1})", share.name, share.percent)?;
        }
        Ok(())
    }
}

/// The `top_threshold` highest counts, highest first.
///
/// Equal counts are ordered by tag name so the ranking is reproducible.
pub fn annual_top_tags(counts: &TagCounts, top_threshold: usize) -> Vec<&TagAndCount> {
    let mut ordered: Vec<&TagAndCount> = counts.values().collect();
    ordered.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ordered.truncate(top_threshold);
    ordered
}

/// Share of `plays` taken by `count`, as a percentage.
pub fn percent_of(count: u64, plays: u64) -> f64 {
    if plays == 0 {
        return 0.0;
    }
    count as f64 / plays as f64 * 100.0
}

/// Rank every year in the state's range, empty years included.
pub fn report(state: &State, top_threshold: usize) -> Vec<YearReport> {
    state
        .years()
        .map(|year| {
            let plays = state.plays_in(year);
            let top: Vec<TagShare> = state
                .tag_counts(year)
                .map(|counts| {
                    annual_top_tags(counts, top_threshold)
                        .into_iter()
                        .map(|tc| TagShare {
                            name: tc.name.clone(),
                            count: tc.count,
                            percent: percent_of(tc.count, plays),
                        })
                        .collect()
                })
                .unwrap_or_default();

            YearReport { year, plays, top }
        })
        .collect()
}
