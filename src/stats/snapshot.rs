//! JSON snapshot of the [`State`] between runs.
//!
//! A missing snapshot means a first run and yields a fresh state. A
//! snapshot that exists but can't be read or decoded is an error: silently
//! starting over would throw away the whole history.
//!
//! Saves go to a sibling temp file that is then renamed over the snapshot,
//! so an interrupted save leaves the previous snapshot intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::State;

/// Errors reading or writing the snapshot file
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to decode snapshot {0}: {1}")]
    Decode(PathBuf, serde_json::Error),

    #[error("Failed to encode snapshot: {0}")]
    Encode(serde_json::Error),

    #[error("Failed to write snapshot to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

/// Snapshot file location
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state, or a fresh one if nothing was saved yet.
    pub fn load(&self) -> Result<State, SnapshotError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No snapshot at {:?}, starting fresh", self.path);
                return Ok(State::default());
            }
            Err(e) => return Err(SnapshotError::Read(self.path.clone(), e)),
        };

        let state: State = serde_json::from_str(&contents)
            .map_err(|e| SnapshotError::Decode(self.path.clone(), e))?;

        tracing::info!(
            "Loaded snapshot from {:?}: {} plays, {} artists, last play {}",
            self.path,
            state.total_plays(),
            state.artist_tag.len(),
            state.most_recent_play.to_rfc3339()
        );
        Ok(state)
    }

    /// Write `state` to the snapshot file.
    pub fn save(&self, state: &State) -> Result<(), SnapshotError> {
        let contents = serde_json::to_string(state).map_err(SnapshotError::Encode)?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, contents)
            .map_err(|e| SnapshotError::Write(temp_path.clone(), e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| SnapshotError::Rename(temp_path, self.path.clone(), e))?;

        tracing::info!("Saved snapshot to {:?}", self.path);
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
