// Snapshot codec
//
// A codec turns a tray tree into an immutable snapshot string and back. The
// history engine only ever talks to the `Codec` trait; concrete formats live
// in `serialization`.

pub mod serialization;

use crate::tray::{Tray, TrayData, TrayError, TrayId};
use serde::{Deserialize, Serialize};

pub use serialization::{JsonCodec, RonCodec};

/// Current snapshot envelope version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Codec error types
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error("Failed to decode snapshot: {0}")]
    Decode(String),

    #[error("Cannot encode malformed tray tree: {0}")]
    Malformed(TrayError),

    #[error("Unsupported snapshot format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Inconsistent tray tree in snapshot: {0}")]
    Tree(#[from] TrayError),
}

impl CodecError {
    /// Whether this error came from reading a snapshot rather than writing one
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            CodecError::Decode(_) | CodecError::UnsupportedVersion(_) | CodecError::Tree(_)
        )
    }
}

/// Opaque serialized state of one tray tree
///
/// Snapshots are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(contents: impl Into<String>) -> Self {
        Self(contents.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Snapshot {
    fn from(contents: String) -> Self {
        Self(contents)
    }
}

impl From<&str> for Snapshot {
    fn from(contents: &str) -> Self {
        Self(contents.to_string())
    }
}

/// Strategy for converting between trays and snapshots
///
/// `deserialize(serialize(t))` must yield a tree equal to `t`.
pub trait Codec: Send {
    /// Short format name, used in logs
    fn name(&self) -> &'static str;

    /// Encode the tree rooted at `root`
    ///
    /// # Errors
    /// Fails if the tree is malformed (duplicate ids, broken parent links).
    fn serialize(&self, root: &Tray) -> CodecResult<Snapshot>;

    /// Decode a snapshot produced by `serialize`
    fn deserialize(&self, snapshot: &Snapshot) -> CodecResult<Tray>;
}

/// Codec selection for configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Json,
    Ron,
}

impl CodecKind {
    pub fn build(self, pretty: bool) -> Box<dyn Codec> {
        match self {
            CodecKind::Json => Box::new(JsonCodec::new(pretty)),
            CodecKind::Ron => Box::new(RonCodec::new(pretty)),
        }
    }
}

/// On-the-wire layout shared by all codecs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub format_version: u32,
    pub root: TrayId,
    /// Every tray of the tree in pre-order
    pub trays: Vec<TrayData>,
}

impl SnapshotEnvelope {
    pub fn from_tray(root: &Tray) -> CodecResult<Self> {
        root.validate().map_err(CodecError::Malformed)?;
        Ok(Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            root: root.id().clone(),
            trays: root.flatten(),
        })
    }

    pub fn into_tray(self) -> CodecResult<Tray> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(self.format_version));
        }
        Ok(Tray::assemble(&self.root, self.trays)?)
    }
}
