//! File-backed snapshot store.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Result, SnapshotStore};
use crate::document::SnapshotDocument;

/// Stores the snapshot as pretty-printed UTF-8 JSON at a fixed path.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target.
#[derive(Clone, Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Creates the store, creating the parent directory when missing.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn write(&self, document: &SnapshotDocument) -> Result<()> {
        let temp_path = self.temp_path();
        let bytes = serde_json::to_vec_pretty(document)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            running = document.running,
            "snapshot written"
        );
        Ok(())
    }

    fn read(&self) -> Result<Option<SnapshotDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let document = serde_json::from_slice(&bytes)?;
        Ok(Some(document))
    }
}
