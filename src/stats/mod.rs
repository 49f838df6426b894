//! Per-year tag statistics built incrementally from play history.
//!
//! - `state` - the durable aggregate and its snapshot schema
//! - `tags` - artist -> canonical tag, memoized in the state
//! - `aggregate` - folding play events into the state
//! - `snapshot` - loading and saving the state between runs
//! - `report` - top tags per year

mod aggregate;
mod report;
mod snapshot;
mod state;
mod tags;

pub use aggregate::{UpdateSummary, absorb, update};
pub use report::{
    DEFAULT_TOP_THRESHOLD, TagShare, YearReport, annual_top_tags, percent_of, report,
};
pub use snapshot::{SnapshotError, SnapshotStore};
pub use state::{AnnualCounts, State, TagAndCount, TagCounts};
pub use tags::{NO_TAG, canonicalize_tag, resolve_tag};
