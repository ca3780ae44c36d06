// HistoryManager - Records snapshots and performs undo

use crate::codec::{Codec, JsonCodec, Snapshot};
use crate::config::{ConfigError, HistoryConfig};
use crate::history::buffer::HistoryBuffer;
use crate::history::HistoryResult;
use crate::render::RenderBridge;

/// Snapshot-based undo engine
///
/// The manager owns the history buffer and the codec used to capture and
/// restore trees. It is the only writer of the buffer.
///
/// - `record` appends the current state (explicit or captured from the
///   render bridge), evicting the oldest snapshot when full.
/// - `undo` drops the most recent snapshot and re-renders the one before it.
///
/// Both operations treat "nothing to do" as a normal outcome and return
/// `Ok(false)` instead of an error.
pub struct HistoryManager {
    buffer: HistoryBuffer,
    codec: Box<dyn Codec>,
    restore_on_decode_failure: bool,
}

impl HistoryManager {
    /// Create a manager with the default capacity around `codec`
    pub fn new(codec: Box<dyn Codec>) -> Self {
        Self {
            buffer: HistoryBuffer::new(),
            codec,
            restore_on_decode_failure: false,
        }
    }

    /// Create a manager around `codec` using the limits from `config`
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if `config` fails validation, e.g. a
    /// capacity too small to ever undo.
    pub fn with_config(
        codec: Box<dyn Codec>,
        config: &HistoryConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buffer: HistoryBuffer::with_capacity(config.capacity),
            codec,
            restore_on_decode_failure: config.restore_on_decode_failure,
        })
    }

    /// Create a manager with the codec selected by `config`
    pub fn from_config(config: &HistoryConfig) -> Result<Self, ConfigError> {
        Self::with_config(config.codec.build(config.pretty), config)
    }

    /// Record a snapshot of the current state
    ///
    /// When `snapshot` is `None` the displayed root is captured through
    /// `bridge`. If nothing is mounted this is a no-op and returns `Ok(false)`.
    ///
    /// # Errors
    /// Returns an error if the displayed tree cannot be serialized.
    pub fn record<B>(&mut self, snapshot: Option<Snapshot>, bridge: &B) -> HistoryResult<bool>
    where
        B: RenderBridge + ?Sized,
    {
        let snapshot = match snapshot {
            Some(snapshot) => snapshot,
            None => match self.capture(bridge)? {
                Some(snapshot) => snapshot,
                None => {
                    tracing::debug!("No active root tray, nothing to record");
                    return Ok(false);
                }
            },
        };

        self.record_snapshot(snapshot);
        Ok(true)
    }

    /// Append an explicit snapshot
    pub fn record_snapshot(&mut self, snapshot: Snapshot) {
        let size = snapshot.len();
        if let Some(evicted) = self.buffer.push(snapshot) {
            tracing::trace!(bytes = evicted.len(), "Evicted oldest snapshot");
        }
        tracing::debug!(len = self.buffer.len(), bytes = size, "Recorded snapshot");
    }

    /// Serialize the displayed root, if there is one
    pub fn capture<B>(&self, bridge: &B) -> HistoryResult<Option<Snapshot>>
    where
        B: RenderBridge + ?Sized,
    {
        match bridge.active_root() {
            Some(root) => Ok(Some(self.codec.serialize(root)?)),
            None => Ok(None),
        }
    }

    /// Restore the state recorded before the most recent one
    ///
    /// Needs at least two snapshots; otherwise this is a no-op that returns
    /// `Ok(false)` without rendering.
    ///
    /// # Errors
    /// Returns the codec error if the prior snapshot cannot be decoded. The
    /// popped snapshot stays discarded unless `restore_on_decode_failure`
    /// is set, in which case the buffer is left exactly as it was.
    pub fn undo<B>(&mut self, bridge: &mut B) -> HistoryResult<bool>
    where
        B: RenderBridge + ?Sized,
    {
        if !self.can_undo() {
            tracing::debug!(len = self.buffer.len(), "Nothing to undo");
            return Ok(false);
        }

        let Some(current) = self.buffer.pop() else {
            return Ok(false);
        };
        let Some(prior) = self.buffer.head() else {
            return Ok(false);
        };

        let root = match self.codec.deserialize(prior) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!(codec = self.codec.name(), error = %e, "Failed to decode prior snapshot");
                if self.restore_on_decode_failure {
                    self.buffer.push(current);
                }
                return Err(e.into());
            }
        };

        tracing::info!(root = %root.id(), len = self.buffer.len(), "Undo");
        bridge.render_root_tray(root);
        Ok(true)
    }

    /// Whether a prior state exists to undo to
    pub fn can_undo(&self) -> bool {
        self.buffer.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Most recently recorded snapshot
    pub fn head(&self) -> Option<&Snapshot> {
        self.buffer.head()
    }

    /// Recorded snapshots, oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.buffer.iter()
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(Box::new(JsonCodec::default()))
    }
}
