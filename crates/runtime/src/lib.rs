//! Runtime orchestration for the controller side of the tracker.
//!
//! This crate shares the authoritative [`Encounter`](tracker_core::Encounter)
//! between the controller and a background publisher that mirrors it into a
//! snapshot store. Controllers embed [`Runtime`] and mutate the encounter
//! through [`EncounterHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`projection`] turns encounter state into the wire document
//! - [`config`] reads publisher settings from the environment
//! - [`workers`] keeps the publishing loop internal to the crate
pub mod api;
pub mod config;
pub mod projection;
pub mod runtime;

mod workers;

pub use api::{EncounterHandle, Result, RuntimeError, RuntimeHandle};
pub use config::PublisherConfig;
pub use runtime::{Runtime, RuntimeBuilder};
pub use workers::{SnapshotPublisher, TickOutcome};
