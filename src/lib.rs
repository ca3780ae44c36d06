// traystack - Tray tree model with snapshot-based undo

pub mod codec;
pub mod config;
pub mod history;
pub mod render;
pub mod tray;

// Re-export commonly used types for convenience
pub use codec::{Codec, CodecError, CodecKind, JsonCodec, RonCodec, Snapshot};
pub use config::{ConfigError, HistoryConfig};
pub use history::{HistoryError, HistoryManager, HistoryResult, SharedHistory};
pub use render::{ElementRef, ElementRegistry, MountedView, RenderBridge};
pub use tray::{FlexDirection, Tray, TrayData, TrayError, TrayId};
