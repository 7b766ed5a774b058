//! Viewer configuration structures and loaders.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::message::DEFAULT_LOG_LINES;

/// Settings for the snapshot consumer.
#[derive(Clone, Debug)]
pub struct ConsumerConfig {
    pub snapshot_path: PathBuf,
    pub poll_interval: Duration,
    /// Delay between "combat ended" and the automatic log clear.
    pub log_clear_after: Duration,
    pub log_lines: usize,
    pub event_buffer: usize,
    pub command_buffer: usize,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: snapshot_protocol::default_snapshot_path(),
            poll_interval: Duration::from_millis(250),
            log_clear_after: Duration::from_secs(10),
            log_lines: DEFAULT_LOG_LINES,
            event_buffer: 64,
            command_buffer: 8,
        }
    }
}

impl ConsumerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRACKER_SNAPSHOT_PATH` - Snapshot file (default: platform data dir)
    /// - `TRACKER_POLL_INTERVAL_MS` - Poll period (default: 250)
    /// - `TRACKER_LOG_CLEAR_SECS` - Log clear delay after combat (default: 10)
    /// - `TRACKER_EVENT_BUFFER` - Display event queue size (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("TRACKER_SNAPSHOT_PATH") {
            config.snapshot_path = PathBuf::from(path);
        }

        if let Some(millis) = read_env::<u64>("TRACKER_POLL_INTERVAL_MS") {
            config.poll_interval = Duration::from_millis(millis.max(1));
        }

        if let Some(secs) = read_env::<u64>("TRACKER_LOG_CLEAR_SECS") {
            config.log_clear_after = Duration::from_secs(secs);
        }

        if let Some(capacity) = read_env::<usize>("TRACKER_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
