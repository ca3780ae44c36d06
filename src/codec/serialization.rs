// Concrete snapshot codecs

use crate::codec::{Codec, CodecError, CodecResult, Snapshot, SnapshotEnvelope};
use crate::tray::Tray;
use ron::ser::PrettyConfig;

/// JSON snapshots via serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, root: &Tray) -> CodecResult<Snapshot> {
        let envelope = SnapshotEnvelope::from_tray(root)?;
        let encoded = if self.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        };
        encoded
            .map(Snapshot::from)
            .map_err(|e| CodecError::Encode(format!("Failed to serialize to JSON: {}", e)))
    }

    fn deserialize(&self, snapshot: &Snapshot) -> CodecResult<Tray> {
        let envelope: SnapshotEnvelope = serde_json::from_str(snapshot.as_str())
            .map_err(|e| CodecError::Decode(format!("Failed to deserialize from JSON: {}", e)))?;
        envelope.into_tray()
    }
}

/// RON snapshots via ron
#[derive(Debug, Clone, Copy, Default)]
pub struct RonCodec {
    pretty: bool,
}

impl RonCodec {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Codec for RonCodec {
    fn name(&self) -> &'static str {
        "ron"
    }

    fn serialize(&self, root: &Tray) -> CodecResult<Snapshot> {
        let envelope = SnapshotEnvelope::from_tray(root)?;
        let encoded = if self.pretty {
            ron::ser::to_string_pretty(&envelope, PrettyConfig::default())
        } else {
            ron::to_string(&envelope)
        };
        encoded
            .map(Snapshot::from)
            .map_err(|e| CodecError::Encode(format!("Failed to serialize to RON: {}", e)))
    }

    fn deserialize(&self, snapshot: &Snapshot) -> CodecResult<Tray> {
        let envelope: SnapshotEnvelope = ron::from_str(snapshot.as_str())
            .map_err(|e| CodecError::Decode(format!("Failed to deserialize from RON: {}", e)))?;
        envelope.into_tray()
    }
}
