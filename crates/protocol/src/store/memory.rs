use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Result, SnapshotStore, StoreError};
use crate::document::SnapshotDocument;

/// In-memory store that also counts writes.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    document: RwLock<Option<SnapshotDocument>>,
    writes: AtomicUsize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn write(&self, document: &SnapshotDocument) -> Result<()> {
        let mut current = self
            .document
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        *current = Some(document.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn read(&self) -> Result<Option<SnapshotDocument>> {
        let current = self
            .document
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(current.clone())
    }
}
