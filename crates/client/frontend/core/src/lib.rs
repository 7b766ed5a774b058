//! Viewer-side primitives for presenting a live encounter.
//!
//! Houses snapshot narration, the rolling message log and the reconciled
//! display list, plus the polling worker that drives them. Depends only on
//! the snapshot wire format, never on the tracker rules.
pub mod config;
pub mod consumer;
pub mod error;
pub mod event;
pub mod message;
pub mod narration;
pub mod view_model;
pub mod worker;

pub use config::ConsumerConfig;
pub use consumer::{DisplayFrame, DisplayState};
pub use error::{ConsumerError, Result};
pub use event::DisplayEvent;
pub use message::{MessageEntry, MessageLog};
pub use narration::{Narration, NarrationKind, narrate};
pub use view_model::{DisplayList, DisplayRow, ReconcileOutcome, RowChange, RowFields};
pub use worker::{Consumer, ConsumerBuilder};
