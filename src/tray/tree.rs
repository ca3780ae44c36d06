// Tree operations on Tray: editing, lookup, projection and reassembly

use crate::tray::{Tray, TrayData, TrayError, TrayId};
use std::collections::{HashMap, HashSet};

impl Tray {
    /// Direct children in render order
    pub fn children(&self) -> &[Tray] {
        &self.children
    }

    /// Ids of the direct children in render order
    pub fn children_ids(&self) -> Vec<TrayId> {
        self.children.iter().map(|child| child.id.clone()).collect()
    }

    /// Number of trays in this subtree, including self
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_| count += 1);
        count
    }

    /// All ids of this subtree in pre-order
    pub fn ids(&self) -> Vec<TrayId> {
        let mut ids = Vec::new();
        self.walk(|tray| ids.push(tray.id.clone()));
        ids
    }

    pub fn contains(&self, id: &TrayId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &TrayId) -> Option<&Tray> {
        let mut stack = vec![self];
        while let Some(tray) = stack.pop() {
            if &tray.id == id {
                return Some(tray);
            }
            stack.extend(tray.children.iter());
        }
        None
    }

    pub fn find_mut(&mut self, id: &TrayId) -> Option<&mut Tray> {
        let mut stack = vec![self];
        while let Some(tray) = stack.pop() {
            if &tray.id == id {
                return Some(tray);
            }
            stack.extend(tray.children.iter_mut());
        }
        None
    }

    /// Append a child, taking ownership of it
    ///
    /// # Errors
    /// Fails with `DuplicateId` if any id of the child's subtree already
    /// exists in this subtree.
    pub fn add_child(&mut self, child: Tray) -> Result<(), TrayError> {
        let index = self.children.len();
        self.insert_child(index, child)
    }

    /// Insert a child at `index` among the direct children
    pub fn insert_child(&mut self, index: usize, mut child: Tray) -> Result<(), TrayError> {
        if index > self.children.len() {
            return Err(TrayError::IndexOutOfBounds {
                index,
                len: self.children.len(),
            });
        }

        let mut seen: HashSet<TrayId> = self.ids().into_iter().collect();
        for id in child.ids() {
            if !seen.insert(id.clone()) {
                return Err(TrayError::DuplicateId(id));
            }
        }

        child.parent_id = Some(self.id.clone());
        self.children.insert(index, child);
        Ok(())
    }

    /// Remove a direct child, returning it as a detached root
    pub fn remove_child(&mut self, id: &TrayId) -> Option<Tray> {
        let position = self.children.iter().position(|child| &child.id == id)?;
        let mut child = self.children.remove(position);
        child.parent_id = None;
        Some(child)
    }

    /// Remove a tray anywhere below this one
    pub fn detach(&mut self, id: &TrayId) -> Option<Tray> {
        let mut stack = vec![self];
        while let Some(tray) = stack.pop() {
            if tray.children.iter().any(|child| &child.id == id) {
                return tray.remove_child(id);
            }
            stack.extend(tray.children.iter_mut());
        }
        None
    }

    /// Serializable projection of this node alone
    pub fn to_data(&self) -> TrayData {
        TrayData {
            id: self.id.clone(),
            name: self.name.clone(),
            children_ids: self.children_ids(),
            parent_id: self.parent_id.clone(),
            border_color: self.border_color.clone(),
            created_dt: self.created_dt,
            flex_direction: self.flex_direction,
            host_url: self.host_url.clone(),
            filename: self.filename.clone(),
            is_folded: self.is_folded,
            properties: self.properties.clone(),
        }
    }

    /// Pre-order projection of the whole subtree
    pub fn flatten(&self) -> Vec<TrayData> {
        let mut trays = Vec::new();
        self.walk(|tray| trays.push(tray.to_data()));
        trays
    }

    /// Check that ids are unique and every child points back at its owner
    pub fn validate(&self) -> Result<(), TrayError> {
        let mut seen = HashSet::new();
        let mut stack = vec![self];

        while let Some(tray) = stack.pop() {
            if !seen.insert(&tray.id) {
                return Err(TrayError::DuplicateId(tray.id.clone()));
            }
            for child in &tray.children {
                if child.parent_id.as_ref() != Some(&tray.id) {
                    return Err(TrayError::ParentMismatch {
                        child: child.id.clone(),
                        expected: tray.id.clone(),
                        found: child.parent_id.clone(),
                    });
                }
            }
            stack.extend(tray.children.iter().rev());
        }
        Ok(())
    }

    /// Rebuild an owning tree from flat projections
    ///
    /// The root keeps whatever `parent_id` it was recorded with, so a subtree
    /// projection reassembles to an equal subtree. Every other entry must be
    /// reachable exactly once and agree with its owner on `parent_id`.
    pub fn assemble(root: &TrayId, trays: Vec<TrayData>) -> Result<Tray, TrayError> {
        let mut pool: HashMap<TrayId, TrayData> = HashMap::with_capacity(trays.len());
        for data in trays {
            if pool.contains_key(&data.id) {
                return Err(TrayError::DuplicateId(data.id));
            }
            pool.insert(data.id.clone(), data);
        }

        let root_data = pool
            .remove(root)
            .ok_or_else(|| TrayError::MissingRoot(root.clone()))?;
        let (root_tray, root_children) = detached(root_data);

        let mut consumed = HashSet::new();
        consumed.insert(root.clone());

        // Pre-order: (child id, owner slot) where slot 0 is the root and
        // slot n is descendants[n - 1]
        let mut descendants: Vec<(Tray, usize)> = Vec::with_capacity(pool.len());
        let mut stack: Vec<(TrayId, usize)> =
            root_children.into_iter().rev().map(|id| (id, 0)).collect();

        while let Some((child_id, owner)) = stack.pop() {
            let child_data = match pool.remove(&child_id) {
                Some(child_data) => child_data,
                None if consumed.contains(&child_id) => {
                    return Err(TrayError::Cycle(child_id));
                }
                None => return Err(TrayError::UnresolvedId(child_id)),
            };

            let owner_id = match owner {
                0 => &root_tray.id,
                n => &descendants[n - 1].0.id,
            };
            if child_data.parent_id.as_ref() != Some(owner_id) {
                return Err(TrayError::ParentMismatch {
                    child: child_id,
                    expected: owner_id.clone(),
                    found: child_data.parent_id,
                });
            }

            consumed.insert(child_id);
            let (tray, children_ids) = detached(child_data);
            descendants.push((tray, owner));
            let slot = descendants.len();
            stack.extend(children_ids.into_iter().rev().map(|id| (id, slot)));
        }

        // Report the smallest leftover id so the error is deterministic
        if let Some(orphan) = pool.keys().min() {
            return Err(TrayError::Orphaned(orphan.clone()));
        }

        Ok(link(root_tray, descendants))
    }

    fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Tray)) {
        let mut stack = vec![self];
        while let Some(tray) = stack.pop() {
            visit(tray);
            stack.extend(tray.children.iter().rev());
        }
    }

    /// Copy of this node without its children
    fn detached_copy(&self) -> Tray {
        Tray {
            id: self.id.clone(),
            name: self.name.clone(),
            children: Vec::new(),
            parent_id: self.parent_id.clone(),
            border_color: self.border_color.clone(),
            created_dt: self.created_dt,
            flex_direction: self.flex_direction,
            host_url: self.host_url.clone(),
            filename: self.filename.clone(),
            is_folded: self.is_folded,
            properties: self.properties.clone(),
        }
    }

    fn same_node(&self, other: &Tray) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.parent_id == other.parent_id
            && self.border_color == other.border_color
            && self.created_dt == other.created_dt
            && self.flex_direction == other.flex_direction
            && self.host_url == other.host_url
            && self.filename == other.filename
            && self.is_folded == other.is_folded
            && self.properties == other.properties
            && self.children.len() == other.children.len()
    }
}

// Clone, equality and drop walk the tree with explicit stacks so that depth
// is bounded by heap, not by the thread's stack.

impl Clone for Tray {
    fn clone(&self) -> Self {
        let mut descendants: Vec<(Tray, usize)> = Vec::new();
        let mut stack: Vec<(&Tray, usize)> =
            self.children.iter().rev().map(|c| (c, 0)).collect();

        while let Some((tray, owner)) = stack.pop() {
            descendants.push((tray.detached_copy(), owner));
            let slot = descendants.len();
            stack.extend(tray.children.iter().rev().map(|c| (c, slot)));
        }

        link(self.detached_copy(), descendants)
    }
}

impl PartialEq for Tray {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if !a.same_node(b) {
                return false;
            }
            stack.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

impl Drop for Tray {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut tray) = stack.pop() {
            stack.append(&mut tray.children);
        }
    }
}

/// Split a projection into a childless tray and its ordered child ids
fn detached(data: TrayData) -> (Tray, Vec<TrayId>) {
    let tray = Tray {
        id: data.id,
        name: data.name,
        children: Vec::new(),
        parent_id: data.parent_id,
        border_color: data.border_color,
        created_dt: data.created_dt,
        flex_direction: data.flex_direction,
        host_url: data.host_url,
        filename: data.filename,
        is_folded: data.is_folded,
        properties: data.properties,
    };
    (tray, data.children_ids)
}

/// Attach pre-ordered descendants to their owners
///
/// `descendants[i]` names its owner by slot: 0 is `root`, n is
/// `descendants[n - 1]`. Owners always precede the trays they own.
fn link(mut root: Tray, descendants: Vec<(Tray, usize)>) -> Tray {
    let mut owners: Vec<usize> = Vec::with_capacity(descendants.len());
    let mut slots: Vec<Option<Tray>> = Vec::with_capacity(descendants.len());
    for (tray, owner) in descendants {
        owners.push(owner);
        slots.push(Some(tray));
    }

    // Walking backwards, every tray is complete before it is moved into its
    // owner; children arrive last-first and are reversed once complete.
    for index in (0..slots.len()).rev() {
        let Some(mut tray) = slots[index].take() else {
            continue;
        };
        tray.children.reverse();
        match owners[index] {
            0 => root.children.push(tray),
            n => {
                if let Some(owner) = slots[n - 1].as_mut() {
                    owner.children.push(tray);
                }
            }
        }
    }
    root.children.reverse();
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tray::FlexDirection;

    fn sample_tree() -> Tray {
        let mut root = Tray::with_id(TrayId::from("root"), "Root");
        let mut inbox = Tray::with_id(TrayId::from("inbox"), "Inbox");
        inbox
            .add_child(Tray::with_id(TrayId::from("todo"), "Todo"))
            .unwrap();
        root.add_child(inbox).unwrap();
        let mut done = Tray::with_id(TrayId::from("done"), "Done");
        done.flex_direction = FlexDirection::Row;
        done.is_folded = true;
        root.add_child(done).unwrap();
        root
    }

    #[test]
    fn test_add_child_sets_parent() {
        let root = sample_tree();
        let inbox = root.find(&TrayId::from("inbox")).unwrap();
        assert_eq!(inbox.parent_id(), Some(&TrayId::from("root")));
        assert_eq!(
            root.children_ids(),
            vec![TrayId::from("inbox"), TrayId::from("done")]
        );
        assert_eq!(root.node_count(), 4);
        assert!(root.validate().is_ok());
    }

    #[test]
    fn test_add_child_rejects_duplicate_id() {
        let mut root = sample_tree();
        let result = root.add_child(Tray::with_id(TrayId::from("todo"), "Again"));
        assert_eq!(result, Err(TrayError::DuplicateId(TrayId::from("todo"))));
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_insert_child_order_and_bounds() {
        let mut root = sample_tree();
        root.insert_child(0, Tray::with_id(TrayId::from("first"), "First"))
            .unwrap();
        assert_eq!(root.children_ids()[0], TrayId::from("first"));

        let result = root.insert_child(9, Tray::new("Nope"));
        assert_eq!(
            result,
            Err(TrayError::IndexOutOfBounds { index: 9, len: 3 })
        );
    }

    #[test]
    fn test_remove_and_detach() {
        let mut root = sample_tree();

        let todo = root.detach(&TrayId::from("todo")).unwrap();
        assert!(todo.is_root());
        assert!(!root.contains(&TrayId::from("todo")));

        let done = root.remove_child(&TrayId::from("done")).unwrap();
        assert!(done.is_root());
        assert_eq!(root.children_ids(), vec![TrayId::from("inbox")]);

        assert!(root.remove_child(&TrayId::from("missing")).is_none());
    }

    #[test]
    fn test_flatten_is_preorder() {
        let root = sample_tree();
        let ids: Vec<_> = root.flatten().into_iter().map(|data| data.id).collect();
        assert_eq!(
            ids,
            vec![
                TrayId::from("root"),
                TrayId::from("inbox"),
                TrayId::from("todo"),
                TrayId::from("done"),
            ]
        );
    }

    #[test]
    fn test_assemble_inverts_flatten() {
        let root = sample_tree();
        let rebuilt = Tray::assemble(root.id(), root.flatten()).unwrap();
        assert_eq!(rebuilt, root);
    }

    #[test]
    fn test_assemble_subtree_keeps_root_parent() {
        let root = sample_tree();
        let inbox = root.find(&TrayId::from("inbox")).unwrap();
        let rebuilt = Tray::assemble(inbox.id(), inbox.flatten()).unwrap();
        assert_eq!(&rebuilt, inbox);
        assert_eq!(rebuilt.parent_id(), Some(&TrayId::from("root")));
    }

    #[test]
    fn test_assemble_missing_root() {
        let root = sample_tree();
        let result = Tray::assemble(&TrayId::from("nowhere"), root.flatten());
        assert_eq!(result, Err(TrayError::MissingRoot(TrayId::from("nowhere"))));
    }

    #[test]
    fn test_assemble_unresolved_child() {
        let root = sample_tree();
        let trays: Vec<_> = root
            .flatten()
            .into_iter()
            .filter(|data| data.id.as_str() != "todo")
            .collect();
        let result = Tray::assemble(root.id(), trays);
        assert_eq!(result, Err(TrayError::UnresolvedId(TrayId::from("todo"))));
    }

    #[test]
    fn test_assemble_orphan() {
        let root = sample_tree();
        let mut trays = root.flatten();
        let mut stray = Tray::with_id(TrayId::from("stray"), "Stray").to_data();
        stray.parent_id = Some(TrayId::from("root"));
        trays.push(stray);
        let result = Tray::assemble(root.id(), trays);
        assert_eq!(result, Err(TrayError::Orphaned(TrayId::from("stray"))));
    }

    #[test]
    fn test_assemble_cycle() {
        let root = sample_tree();
        let mut trays = root.flatten();
        // todo claims the root as its child
        let todo = trays
            .iter_mut()
            .find(|data| data.id.as_str() == "todo")
            .unwrap();
        todo.children_ids.push(TrayId::from("root"));
        let result = Tray::assemble(root.id(), trays);
        assert_eq!(result, Err(TrayError::Cycle(TrayId::from("root"))));
    }

    #[test]
    fn test_assemble_parent_mismatch() {
        let root = sample_tree();
        let mut trays = root.flatten();
        let done = trays
            .iter_mut()
            .find(|data| data.id.as_str() == "done")
            .unwrap();
        done.parent_id = Some(TrayId::from("inbox"));
        let result = Tray::assemble(root.id(), trays);
        assert!(matches!(result, Err(TrayError::ParentMismatch { .. })));
    }

    #[test]
    fn test_validate_detects_broken_back_reference() {
        let mut root = sample_tree();
        root.find_mut(&TrayId::from("todo")).unwrap().parent_id = Some(TrayId::from("done"));
        assert!(matches!(
            root.validate(),
            Err(TrayError::ParentMismatch { .. })
        ));
    }

    fn deep_chain(depth: usize) -> Vec<TrayData> {
        (0..depth)
            .map(|level| {
                let mut data = Tray::with_id(TrayId::new(format!("n{}", level)), "level").to_data();
                if level > 0 {
                    data.parent_id = Some(TrayId::new(format!("n{}", level - 1)));
                }
                if level + 1 < depth {
                    data.children_ids = vec![TrayId::new(format!("n{}", level + 1))];
                }
                data
            })
            .collect()
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 20_000;
        let root = Tray::assemble(&TrayId::from("n0"), deep_chain(depth)).unwrap();

        assert_eq!(root.node_count(), depth);
        assert!(root.validate().is_ok());

        let copy = root.clone();
        assert_eq!(copy, root);
        assert_eq!(copy.flatten().len(), depth);

        let deepest = TrayId::new(format!("n{}", depth - 1));
        let mut edited = copy.clone();
        edited.find_mut(&deepest).unwrap().name = "bottom".to_string();
        assert_ne!(edited, root);

        let detached = edited.detach(&deepest).unwrap();
        assert_eq!(detached.name, "bottom");
        assert_eq!(edited.node_count(), depth - 1);
        assert!(!edited.contains(&deepest));
    }

    #[test]
    fn test_clone_preserves_child_order() {
        let root = sample_tree();
        let copy = root.clone();
        assert_eq!(copy.flatten(), root.flatten());
        assert_eq!(
            copy.find(&TrayId::from("inbox")).unwrap().children_ids(),
            vec![TrayId::from("todo")]
        );
    }
}
