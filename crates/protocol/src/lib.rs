//! Wire format and storage for encounter snapshots.
//!
//! The publisher and the viewer never share memory: the publisher replaces a
//! [`SnapshotDocument`] in a [`SnapshotStore`] and the viewer polls it. This
//! crate is the whole contract between the two and depends on neither side.
pub mod document;
pub mod location;
pub mod store;

pub use document::{
    CombatantEntry, CustomEffectEntry, EffectsSummary, SnapshotDocument, WireKind, WireState,
};
pub use store::{FileSnapshotStore, InMemorySnapshotStore, Result, SnapshotStore, StoreError};
pub use location::{SNAPSHOT_FILE_NAME, default_snapshot_path};
