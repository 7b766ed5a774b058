use std::sync::Arc;

use super::Result;
use crate::document::SnapshotDocument;

/// Destination and source of the latest snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored document.
    fn write(&self, document: &SnapshotDocument) -> Result<()>;

    /// Read the latest document. `Ok(None)` when nothing was written yet.
    fn read(&self) -> Result<Option<SnapshotDocument>>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn write(&self, document: &SnapshotDocument) -> Result<()> {
        (**self).write(document)
    }

    fn read(&self) -> Result<Option<SnapshotDocument>> {
        (**self).read()
    }
}
