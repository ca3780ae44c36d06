// Element-to-tray side index and an in-memory render bridge

use crate::render::{ElementRef, RenderBridge};
use crate::tray::{Tray, TrayId};
use std::collections::{HashMap, HashSet};

/// Non-owning lookup table between displayed elements and trays
///
/// Each element maps to exactly one tray id and vice versa. The table is
/// rebuilt whenever a tree is mounted or unmounted; handles of trays that
/// stay mounted are kept.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    by_element: HashMap<ElementRef, TrayId>,
    by_tray: HashMap<TrayId, ElementRef>,
    next_handle: u64,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-index against the currently mounted tree (`None` = nothing mounted)
    pub fn rebuild(&mut self, root: Option<&Tray>) {
        let ids: Vec<TrayId> = root.map(Tray::ids).unwrap_or_default();
        let mounted: HashSet<&TrayId> = ids.iter().collect();

        self.by_tray.retain(|id, _| mounted.contains(id));
        let by_tray = &self.by_tray;
        self.by_element.retain(|_, id| by_tray.contains_key(id));

        for id in &ids {
            if !self.by_tray.contains_key(id) {
                let element = ElementRef::new(self.next_handle);
                self.next_handle += 1;
                self.by_tray.insert(id.clone(), element);
                self.by_element.insert(element, id.clone());
            }
        }
    }

    pub fn element_for(&self, id: &TrayId) -> Option<ElementRef> {
        self.by_tray.get(id).copied()
    }

    pub fn tray_id(&self, element: ElementRef) -> Option<&TrayId> {
        self.by_element.get(&element)
    }

    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_element.clear();
        self.by_tray.clear();
    }
}

/// Headless render bridge that keeps the displayed tree in memory
#[derive(Debug, Default)]
pub struct MountedView {
    root: Option<Tray>,
    registry: ElementRegistry,
    render_count: usize,
}

impl MountedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `root` as the displayed tree
    pub fn mount(&mut self, root: Tray) {
        self.root = Some(root);
        self.registry.rebuild(self.root.as_ref());
    }

    /// Take the displayed tree down, returning it
    pub fn unmount(&mut self) -> Option<Tray> {
        let root = self.root.take();
        self.registry.rebuild(None);
        root
    }

    pub fn root(&self) -> Option<&Tray> {
        self.root.as_ref()
    }

    /// Mutate the displayed tree, then re-index it
    ///
    /// Returns `None` when nothing is mounted.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Tray) -> R) -> Option<R> {
        let result = self.root.as_mut().map(f);
        self.registry.rebuild(self.root.as_ref());
        result
    }

    pub fn element_for(&self, id: &TrayId) -> Option<ElementRef> {
        self.registry.element_for(id)
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Number of `render_root_tray` calls so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl RenderBridge for MountedView {
    fn root_element(&self) -> Option<ElementRef> {
        self.root
            .as_ref()
            .and_then(|root| self.registry.element_for(root.id()))
    }

    fn resolve(&self, element: ElementRef) -> Option<&Tray> {
        let id = self.registry.tray_id(element)?;
        self.root.as_ref()?.find(id)
    }

    fn render_root_tray(&mut self, root: Tray) {
        tracing::debug!(root = %root.id(), nodes = root.node_count(), "Rendering root tray");
        self.render_count += 1;
        self.mount(root);
    }
}
