//! Default on-disk location shared by the publisher and the viewer.

use std::path::PathBuf;

pub const SNAPSHOT_FILE_NAME: &str = "battle_state.json";

/// Platform data directory for the tracker:
/// - Linux: `~/.local/share/encounter-tracker` (or `$XDG_DATA_HOME/...`)
/// - macOS: `~/Library/Application Support/encounter-tracker`
/// - Windows: `%APPDATA%\encounter-tracker`
/// - Fallback: the working directory
pub fn default_snapshot_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "encounter-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SNAPSHOT_FILE_NAME)
}
