// SharedHistory - Thread-safe handle to a single history timeline

use crate::codec::Snapshot;
use crate::history::{HistoryError, HistoryManager, HistoryResult};
use crate::render::RenderBridge;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to one undo timeline
///
/// Every clone refers to the same `HistoryManager`; record and undo run under
/// a mutex so the buffer length invariants hold with concurrent callers.
#[derive(Clone)]
pub struct SharedHistory {
    inner: Arc<Mutex<HistoryManager>>,
}

impl SharedHistory {
    pub fn new(manager: HistoryManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    fn lock(&self) -> HistoryResult<MutexGuard<'_, HistoryManager>> {
        self.inner.lock().map_err(|_| HistoryError::LockPoisoned)
    }

    pub fn record<B>(&self, snapshot: Option<Snapshot>, bridge: &B) -> HistoryResult<bool>
    where
        B: RenderBridge + ?Sized,
    {
        self.lock()?.record(snapshot, bridge)
    }

    pub fn record_snapshot(&self, snapshot: Snapshot) -> HistoryResult<()> {
        self.lock()?.record_snapshot(snapshot);
        Ok(())
    }

    pub fn undo<B>(&self, bridge: &mut B) -> HistoryResult<bool>
    where
        B: RenderBridge + ?Sized,
    {
        self.lock()?.undo(bridge)
    }

    pub fn len(&self) -> HistoryResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn can_undo(&self) -> HistoryResult<bool> {
        Ok(self.lock()?.can_undo())
    }

    pub fn clear(&self) -> HistoryResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}

impl From<HistoryManager> for SharedHistory {
    fn from(manager: HistoryManager) -> Self {
        Self::new(manager)
    }
}
