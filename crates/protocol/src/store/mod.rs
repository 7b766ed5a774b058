//! Snapshot storage.
//!
//! Stores replace the whole document on every write; readers never observe a
//! partially written snapshot.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use traits::SnapshotStore;
