//! Publisher configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the snapshot publisher.
#[derive(Clone, Debug)]
pub struct PublisherConfig {
    pub snapshot_path: PathBuf,
    pub publish_interval: Duration,
    pub command_buffer: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            snapshot_path: snapshot_protocol::default_snapshot_path(),
            publish_interval: Duration::from_millis(200),
            command_buffer: 16,
        }
    }
}

impl PublisherConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRACKER_SNAPSHOT_PATH` - Snapshot file (default: platform data dir)
    /// - `TRACKER_PUBLISH_INTERVAL_MS` - Publish period (default: 200)
    /// - `TRACKER_COMMAND_BUFFER` - Command queue size (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("TRACKER_SNAPSHOT_PATH") {
            config.snapshot_path = PathBuf::from(path);
        }

        if let Some(millis) = read_env::<u64>("TRACKER_PUBLISH_INTERVAL_MS") {
            config.publish_interval = Duration::from_millis(millis.max(1));
        }

        if let Some(capacity) = read_env::<usize>("TRACKER_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
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
