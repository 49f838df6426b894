//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - Module-specific errors ([`LastFmError`], [`HistoryError`],
//!   [`SnapshotError`]) for detailed handling
//!
//! # Example
//!
//! ```ignore
//! use tag_annals::error::{Error, Result};
//!
//! async fn run(store: &SnapshotStore) -> Result<()> {
//!     let mut state = store.load()?;          // Snapshot errors auto-convert
//!     stats::update(&mut state, ...).await?;  // API errors auto-convert
//!     Ok(())
//! }
//! ```

use crate::history::HistoryError;
use crate::lastfm::LastFmError;
use crate::stats::SnapshotError;

/// Application-wide result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Last.fm request failed (tag lookups)
    #[error("Last.fm error: {0}")]
    LastFm(#[from] LastFmError),

    /// Play history could not be walked
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Snapshot could not be loaded or saved
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, SnapshotError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Snapshot(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, LastFmError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::LastFm(e).context(ctx))
    }
}
