// Snapshot history and undo
//
// Architecture:
// - HistoryBuffer: bounded stack of serialized snapshots, oldest evicted first
// - HistoryManager: records snapshots (explicit or captured from the render
//   bridge) and undoes by re-rendering the previous snapshot
// - SharedHistory: lock-guarded handle for hosts that call in from several threads
//
// Only linear undo is supported: undoing discards the newest snapshot and
// there is no redo stack.

pub mod buffer;
pub mod manager;
pub mod shared;

use crate::codec::CodecError;

pub use buffer::{DEFAULT_CAPACITY, HistoryBuffer};
pub use manager::HistoryManager;
pub use shared::SharedHistory;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// History error types
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("History lock poisoned")]
    LockPoisoned,
}
