//! Unified error types surfaced by the runtime API.
//!
//! Wraps lock, worker coordination and snapshot store failures so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

pub use snapshot_protocol::StoreError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("encounter lock was poisoned")]
    LockPoisoned,

    #[error("publisher worker command channel closed")]
    CommandChannelClosed,

    #[error("publisher worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("publisher worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
