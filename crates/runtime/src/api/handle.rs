//! Cloneable façades over the shared encounter and the publisher worker.
use std::sync::{Arc, RwLock};

use tokio::sync::{mpsc, oneshot};

use tracker_core::Encounter;

use super::errors::{Result, RuntimeError};
use crate::workers::{Command, TickOutcome};

/// Shared, lock-protected encounter.
///
/// Every controller mutation and every publisher snapshot goes through this
/// one lock, so a snapshot never observes a half-applied mutation.
#[derive(Clone, Debug, Default)]
pub struct EncounterHandle {
    inner: Arc<RwLock<Encounter>>,
}

impl EncounterHandle {
    pub fn new(encounter: Encounter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(encounter)),
        }
    }

    /// Run `f` with shared access to the encounter.
    pub fn read<T>(&self, f: impl FnOnce(&Encounter) -> T) -> Result<T> {
        let guard = self.inner.read().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive access to the encounter.
    pub fn write<T>(&self, f: impl FnOnce(&mut Encounter) -> T) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(f(&mut guard))
    }
}

/// Client-facing handle to the running publisher.
#[derive(Clone, Debug)]
pub struct RuntimeHandle {
    encounter: EncounterHandle,
    command_tx: mpsc::Sender<Command>,
}

impl RuntimeHandle {
    pub(crate) fn new(encounter: EncounterHandle, command_tx: mpsc::Sender<Command>) -> Self {
        Self {
            encounter,
            command_tx,
        }
    }

    pub fn encounter(&self) -> &EncounterHandle {
        &self.encounter
    }

    /// Publish immediately instead of waiting for the next interval tick.
    pub async fn flush(&self) -> Result<TickOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Flush { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }
}
