//! Polling worker that feeds snapshots into [`DisplayState`].
//!
//! Any read failure is treated as "not running": the viewer never shows a
//! stale encounter because the publisher crashed or the file is mid-rename.

use std::sync::Arc;
use std::time::Duration;

use snapshot_protocol::{FileSnapshotStore, SnapshotDocument, SnapshotStore};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ConsumerConfig;
use crate::consumer::{DisplayFrame, DisplayState};
use crate::error::{ConsumerError, Result};
use crate::event::DisplayEvent;

/// Commands accepted by the consumer worker.
pub enum Command {
    /// Poll immediately and return the resulting frame.
    Flush { reply: oneshot::Sender<DisplayFrame> },
    Shutdown,
}

/// Background worker polling the store on a fixed interval.
pub struct ConsumerWorker {
    store: Arc<dyn SnapshotStore>,
    state: DisplayState,
    interval: Duration,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<DisplayEvent>,
    read_failing: bool,
}

impl ConsumerWorker {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        state: DisplayState,
        interval: Duration,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<DisplayEvent>,
    ) -> Self {
        Self {
            store,
            state,
            interval,
            command_rx,
            event_tx,
            read_failing: false,
        }
    }

    /// Main worker loop
    pub async fn run(mut self) {
        info!(
            target: "tracker::consumer",
            interval_ms = self.interval.as_millis() as u64,
            "ConsumerWorker started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll(),

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Flush { reply }) => {
                            self.poll();
                            let _ = reply.send(self.state.frame());
                        }
                        Some(Command::Shutdown) => {
                            info!(target: "tracker::consumer", "Shutdown command received");
                            break;
                        }
                        None => {
                            debug!(target: "tracker::consumer", "Command channel closed");
                            break;
                        }
                    }
                }
            }
        }

        info!(target: "tracker::consumer", "ConsumerWorker stopped");
    }

    fn poll(&mut self) {
        let document = self.read_document();
        let now = Instant::now().into_std();

        let mut events = self.state.ingest(document, now);
        events.extend(self.state.tick(now));

        for event in events {
            // No subscribers is fine; the frame is still kept up to date.
            let _ = self.event_tx.send(event);
        }
    }

    fn read_document(&mut self) -> SnapshotDocument {
        match self.store.read() {
            Ok(document) => {
                if self.read_failing {
                    info!(target: "tracker::consumer", "snapshot readable again");
                    self.read_failing = false;
                }
                document.unwrap_or_else(SnapshotDocument::idle)
            }
            Err(e) => {
                if self.read_failing {
                    debug!(target: "tracker::consumer", "snapshot still unreadable: {}", e);
                } else {
                    warn!(target: "tracker::consumer", "snapshot unreadable, showing idle: {}", e);
                    self.read_failing = true;
                }
                SnapshotDocument::idle()
            }
        }
    }
}

/// Running consumer: owns the worker and its channels.
pub struct Consumer {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<DisplayEvent>,
    worker_handle: JoinHandle<()>,
}

impl Consumer {
    pub fn builder() -> ConsumerBuilder {
        ConsumerBuilder::new()
    }

    /// Subscribe to display events. Slow subscribers may observe `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.event_tx.subscribe()
    }

    /// Poll now and return the resulting frame.
    pub async fn flush(&self) -> Result<DisplayFrame> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Flush { reply: reply_tx })
            .await
            .map_err(|_| ConsumerError::CommandChannelClosed)?;

        reply_rx.await.map_err(ConsumerError::ReplyChannelClosed)
    }

    pub async fn shutdown(self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| ConsumerError::CommandChannelClosed)?;

        self.worker_handle
            .await
            .map_err(ConsumerError::WorkerJoin)
    }
}

/// Builder for [`Consumer`].
pub struct ConsumerBuilder {
    config: ConsumerConfig,
    store: Option<Arc<dyn SnapshotStore>>,
}

impl ConsumerBuilder {
    fn new() -> Self {
        Self {
            config: ConsumerConfig::default(),
            store: None,
        }
    }

    pub fn config(mut self, config: ConsumerConfig) -> Self {
        self.config = config;
        self
    }

    /// Read from a custom store instead of the configured file
    pub fn store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the consumer and spawn its worker
    pub fn build(self) -> Result<Consumer> {
        let store: Arc<dyn SnapshotStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileSnapshotStore::new(&self.config.snapshot_path)?),
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer);
        let (event_tx, _event_rx) = broadcast::channel(self.config.event_buffer);

        let state = DisplayState::new(self.config.log_lines, self.config.log_clear_after);
        let worker = ConsumerWorker::new(
            store,
            state,
            self.config.poll_interval,
            command_rx,
            event_tx.clone(),
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Consumer {
            command_tx,
            event_tx,
            worker_handle,
        })
    }
}
