//! Public API surface for runtime consumers.
//!
//! Re-exports the handles used to mutate the encounter and steer the
//! publisher, plus the error types they return.

mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::{EncounterHandle, RuntimeHandle};
