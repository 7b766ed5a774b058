//! Snapshot publisher and the worker loop driving it.
//!
//! Each tick projects the encounter and writes the document only when its
//! content differs from the last write. The timestamp is stamped at write
//! time and does not take part in the comparison, so an untouched encounter
//! causes no writes at all.

use std::sync::Arc;
use std::time::Duration;

use snapshot_protocol::{SnapshotDocument, SnapshotStore};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{EncounterHandle, Result};
use crate::projection;

/// Commands accepted by the publisher worker.
pub enum Command {
    /// Tick immediately and report the outcome.
    Flush {
        reply: oneshot::Sender<Result<TickOutcome>>,
    },

    /// Write the idle document and stop.
    Shutdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Written,
    Unchanged,
}

/// What the store currently holds, as far as this publisher knows.
#[derive(Debug)]
enum LastWrite {
    Nothing,
    Idle,
    Combat(SnapshotDocument),
}

/// Change-detecting writer from encounter to store.
pub struct SnapshotPublisher {
    encounter: EncounterHandle,
    store: Arc<dyn SnapshotStore>,
    last: LastWrite,
}

impl SnapshotPublisher {
    pub fn new(encounter: EncounterHandle, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            encounter,
            store,
            last: LastWrite::Nothing,
        }
    }

    /// Projects the encounter and writes it when it changed.
    ///
    /// A failed write leaves the comparison state untouched so the next tick
    /// retries.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let document = self.encounter.read(projection::project)?;

        if document.is_idle() {
            if matches!(self.last, LastWrite::Idle) {
                return Ok(TickOutcome::Unchanged);
            }
            self.store.write(&document)?;
            self.last = LastWrite::Idle;
            debug!(target: "tracker::publisher", "idle snapshot written");
            return Ok(TickOutcome::Written);
        }

        if let LastWrite::Combat(previous) = &self.last
            && previous.same_content(&document)
        {
            return Ok(TickOutcome::Unchanged);
        }

        self.store
            .write(&document.clone().with_timestamp(unix_timestamp()))?;
        debug!(
            target: "tracker::publisher",
            round = ?document.round,
            combatants = document.combatants.len(),
            active = document.active_ids.len(),
            "snapshot written"
        );
        self.last = LastWrite::Combat(document);
        Ok(TickOutcome::Written)
    }

    /// Unconditionally writes the idle document.
    pub fn finish(&mut self) -> Result<()> {
        self.store.write(&SnapshotDocument::idle())?;
        self.last = LastWrite::Idle;
        Ok(())
    }
}

/// Seconds since the Unix epoch with microsecond precision.
fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Background worker publishing on a fixed interval.
pub struct PublisherWorker {
    publisher: SnapshotPublisher,
    interval: Duration,
    command_rx: mpsc::Receiver<Command>,
}

impl PublisherWorker {
    pub fn new(
        publisher: SnapshotPublisher,
        interval: Duration,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            publisher,
            interval,
            command_rx,
        }
    }

    /// Main worker loop. Always ends with one idle write.
    pub async fn run(mut self) {
        info!(
            target: "tracker::publisher",
            interval_ms = self.interval.as_millis() as u64,
            "PublisherWorker started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.publisher.tick() {
                        warn!(target: "tracker::publisher", "snapshot publish failed: {}", e);
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Flush { reply }) => {
                            let _ = reply.send(self.publisher.tick());
                        }
                        Some(Command::Shutdown) => {
                            info!(target: "tracker::publisher", "Shutdown command received");
                            break;
                        }
                        None => {
                            debug!(target: "tracker::publisher", "Command channel closed");
                            break;
                        }
                    }
                }
            }
        }

        if let Err(e) = self.publisher.finish() {
            warn!(target: "tracker::publisher", "final idle write failed: {}", e);
        }
        info!(target: "tracker::publisher", "PublisherWorker stopped");
    }
}
