//! Errors surfaced by the consumer handle.
use thiserror::Error;
use tokio::sync::oneshot;

pub use snapshot_protocol::StoreError;

pub type Result<T> = std::result::Result<T, ConsumerError>;

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("consumer worker command channel closed")]
    CommandChannelClosed,

    #[error("consumer worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("consumer worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
