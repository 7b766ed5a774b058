//! Worker tasks that back the runtime orchestration.
//!
//! The publisher worker mirrors the encounter into the snapshot store on a
//! fixed interval and on demand.

mod publisher;

pub use publisher::{Command, PublisherWorker, SnapshotPublisher, TickOutcome};
