//! High-level runtime orchestrator.
//!
//! The runtime owns the publisher worker, wires up its command channel, and
//! exposes a builder-based API for controllers.

use std::sync::Arc;

use snapshot_protocol::{FileSnapshotStore, SnapshotStore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{EncounterHandle, Result, RuntimeError, RuntimeHandle};
use crate::config::PublisherConfig;
use crate::workers::{Command, PublisherWorker, SnapshotPublisher, TickOutcome};

/// Controller-side runtime.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    command_tx: mpsc::Sender<Command>,
    publisher_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shortcut for the shared encounter.
    pub fn encounter(&self) -> EncounterHandle {
        self.handle.encounter().clone()
    }

    /// Publish now instead of waiting for the interval.
    pub async fn flush(&self) -> Result<TickOutcome> {
        self.handle.flush().await
    }

    /// Stop the publisher after its final idle write.
    pub async fn shutdown(self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        self.publisher_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!("runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: PublisherConfig,
    encounter: Option<EncounterHandle>,
    store: Option<Arc<dyn SnapshotStore>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: PublisherConfig::default(),
            encounter: None,
            store: None,
        }
    }

    /// Override publisher configuration
    pub fn config(mut self, config: PublisherConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing encounter instead of starting from an empty one
    pub fn encounter(mut self, encounter: EncounterHandle) -> Self {
        self.encounter = Some(encounter);
        self
    }

    /// Publish into a custom store instead of the configured file
    pub fn store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the runtime and spawn the publisher worker
    pub async fn build(self) -> Result<Runtime> {
        let store: Arc<dyn SnapshotStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileSnapshotStore::new(&self.config.snapshot_path)?),
        };
        let encounter = self.encounter.unwrap_or_default();

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer);
        let handle = RuntimeHandle::new(encounter.clone(), command_tx.clone());

        let publisher = SnapshotPublisher::new(encounter, store);
        let worker = PublisherWorker::new(publisher, self.config.publish_interval, command_rx);

        let publisher_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            command_tx,
            publisher_handle,
        })
    }
}
