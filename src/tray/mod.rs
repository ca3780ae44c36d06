// Tray tree model
//
// A tray is a labeled node in the editable hierarchy. Trees are formed by
// ownership (each tray owns its children) with a non-owning `parent_id`
// back-reference. `TrayData` is the flat, serializable projection of a node.

pub mod tree;
pub mod types;

pub use types::{FlexDirection, Properties, Tray, TrayData, TrayId};

/// Tree consistency errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrayError {
    #[error("Duplicate tray id: {0}")]
    DuplicateId(TrayId),

    #[error("Tray {child} has parent {found:?}, expected {expected}")]
    ParentMismatch {
        child: TrayId,
        expected: TrayId,
        found: Option<TrayId>,
    },

    #[error("Unresolved tray id: {0}")]
    UnresolvedId(TrayId),

    #[error("Root tray {0} not found")]
    MissingRoot(TrayId),

    #[error("Tray {0} is not reachable from the root")]
    Orphaned(TrayId),

    #[error("Tray {0} is reachable more than once")]
    Cycle(TrayId),

    #[error("Child index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Helper function to generate unique tray ids
pub fn generate_tray_id() -> TrayId {
    TrayId::generate()
}
