// Render/lookup bridge
//
// The history engine never touches the display directly. It asks a
// `RenderBridge` which element is mounted as the root, resolves that element
// to its tray, and hands restored trees back for re-rendering.

pub mod registry;

use crate::tray::Tray;

pub use registry::{ElementRegistry, MountedView};

/// Handle to a displayed element
///
/// Handles are arena indices; they never own the tray they point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u64);

impl ElementRef {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Display-side collaborator of the history engine
pub trait RenderBridge {
    /// Element currently mounted as the root, if any
    fn root_element(&self) -> Option<ElementRef>;

    /// Tray associated with a displayed element
    fn resolve(&self, element: ElementRef) -> Option<&Tray>;

    /// Mount `root` as the visible tree, replacing whatever was shown
    fn render_root_tray(&mut self, root: Tray);

    /// Resolve the mounted root element to its tray
    fn active_root(&self) -> Option<&Tray> {
        self.root_element().and_then(|element| self.resolve(element))
    }
}
