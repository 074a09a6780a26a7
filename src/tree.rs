//! Arena-backed navigation tree
//!
//! Nodes live in a [`SlotMap`] and refer to each other through [`NodeKey`]
//! handles. A side index maps string ids to handles, and the path index keeps
//! every registered node in registration order so locations such as
//! `root.children.BOX_A.children.NODE_1` can be listed and resolved.

use crate::error::{LrudError, Result};
use crate::node::{Node, NodeAttrs, NodeKey, NodeSnapshot};
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};

/// Separator between a parent location and a child id
pub const CHILDREN_SEGMENT: &str = ".children.";

/// What `remove_subtree` took out of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub parent: Option<NodeKey>,
    /// The removed node was the parent's active child (the slot is now empty)
    pub held_active_slot: bool,
    pub removed: usize,
}

#[derive(Debug, Default)]
pub struct Tree {
    nodes: SlotMap<NodeKey, Node>,
    ids: HashMap<String, NodeKey>,
    path_index: Vec<NodeKey>,
    root: Option<NodeKey>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root.and_then(|key| self.nodes.get(key)).map(Node::id)
    }

    pub fn key(&self, id: &str) -> Option<NodeKey> {
        self.ids.get(id).copied()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn id_of(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(key).map(Node::id)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(Node::children).unwrap_or(&[])
    }

    pub fn first_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).first().copied()
    }

    /// Iterate from `key`'s parent up to the root
    pub fn ancestors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        let mut current = self.nodes.get(key).and_then(Node::parent);
        std::iter::from_fn(move || {
            let key = current?;
            current = self.nodes.get(key).and_then(Node::parent);
            Some(key)
        })
    }

    pub fn depth(&self, key: NodeKey) -> usize {
        self.ancestors(key).count()
    }

    /// True when `key` is `ancestor` or lies below it
    pub fn is_within(&self, key: NodeKey, ancestor: NodeKey) -> bool {
        key == ancestor || self.ancestors(key).any(|k| k == ancestor)
    }

    /// Register a node (and any nested children) under its parent.
    ///
    /// The first registration on an empty tree becomes the root. Without an
    /// explicit parent a node attaches to the root.
    ///
    /// Every id in the nested batch is checked before anything is inserted, so
    /// a rejected registration leaves the tree untouched.
    pub fn register(&mut self, id: &str, attrs: &NodeAttrs) -> Result<NodeKey> {
        let mut batch = HashSet::new();
        self.check_new_ids(id, attrs, &mut batch)?;
        self.insert(id, attrs)
    }

    fn check_new_ids<'a>(
        &self,
        id: &'a str,
        attrs: &'a NodeAttrs,
        batch: &mut HashSet<&'a str>,
    ) -> Result<()> {
        if self.ids.contains_key(id) || !batch.insert(id) {
            return Err(LrudError::DuplicateNode(id.to_string()));
        }
        for child in &attrs.children {
            self.check_new_ids(&child.id, &child.attrs, batch)?;
        }
        Ok(())
    }

    fn insert(&mut self, id: &str, attrs: &NodeAttrs) -> Result<NodeKey> {
        let key = match self.root {
            None => {
                if let Some(parent) = &attrs.parent {
                    log::warn!(
                        "Tree::register: ignoring parent '{}' of first node '{}', it becomes the root",
                        parent,
                        id
                    );
                }
                let key = self
                    .nodes
                    .insert(Node::from_attrs(id.to_string(), None, attrs));
                self.root = Some(key);
                log::debug!("Tree::register: '{}' is the root node", id);
                key
            }
            Some(root) => {
                let parent = match &attrs.parent {
                    Some(parent_id) => self.key(parent_id).ok_or_else(|| LrudError::UnknownParent {
                        id: id.to_string(),
                        parent: parent_id.clone(),
                    })?,
                    None => root,
                };
                let key = self
                    .nodes
                    .insert(Node::from_attrs(id.to_string(), Some(parent), attrs));
                self.adopt_first_child(parent, key);
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.attach_child(key);
                }
                key
            }
        };

        self.ids.insert(id.to_string(), key);
        self.path_index.push(key);
        log::debug!("Tree::register: '{}' at {}", id, self.location(key));

        for child in &attrs.children {
            let mut child_attrs = child.attrs.clone();
            if child_attrs.parent.as_deref().is_some_and(|p| p != id) {
                log::warn!(
                    "Tree::register: nested node '{}' names parent {:?}, using '{}'",
                    child.id,
                    child_attrs.parent,
                    id
                );
            }
            child_attrs.parent = Some(id.to_string());
            self.insert(&child.id, &child_attrs)?;
        }

        if let Some(active_id) = &attrs.active_child {
            match self.key(active_id) {
                Some(child) if self.nodes.get(child).and_then(Node::parent) == Some(key) => {
                    if let Some(node) = self.nodes.get_mut(key) {
                        node.active_child = Some(child);
                    }
                }
                _ => log::warn!(
                    "Tree::register: activeChild '{}' of '{}' is not one of its children, ignoring",
                    active_id,
                    id
                ),
            }
        }

        Ok(key)
    }

    /// Give a parent its first active child. Only touches the immediate parent.
    fn adopt_first_child(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            if parent_node.children.is_empty() {
                parent_node.active_child = Some(child);
            }
        }
    }

    /// Point `activeChild` of every ancestor at the branch leading to `key`
    pub fn set_active_path(&mut self, key: NodeKey) {
        let mut child = key;
        while let Some(parent) = self.nodes.get(child).and_then(Node::parent) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.active_child = Some(child);
            }
            child = parent;
        }
    }

    pub(crate) fn set_active_child(&mut self, parent: NodeKey, child: Option<NodeKey>) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.active_child = child;
        }
    }

    /// Detach `key` from its parent and drop its whole subtree.
    ///
    /// If the node held its parent's active slot the slot is cleared; picking
    /// a replacement is left to the caller.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Option<Removal> {
        let parent = self.nodes.get(key)?.parent;

        let mut held_active_slot = false;
        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent_node.detach_child(key);
            if parent_node.active_child == Some(key) {
                parent_node.active_child = None;
                held_active_slot = true;
            }
        }

        let mut doomed = vec![key];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let children = self.children(doomed[cursor]).to_vec();
            doomed.extend(children);
            cursor += 1;
        }

        for &gone in &doomed {
            if let Some(node) = self.nodes.remove(gone) {
                self.ids.remove(&node.id);
            }
        }
        self.path_index.retain(|k| self.nodes.contains_key(*k));
        if self.root == Some(key) {
            self.root = None;
        }

        Some(Removal {
            parent,
            held_active_slot,
            removed: doomed.len(),
        })
    }

    /// Fully-qualified location of a node, e.g. `root.children.BOX_A`
    pub fn location(&self, key: NodeKey) -> String {
        let mut segments: Vec<&str> = self.ancestors(key).filter_map(|k| self.id_of(k)).collect();
        segments.reverse();
        if let Some(id) = self.id_of(key) {
            segments.push(id);
        }
        segments.join(CHILDREN_SEGMENT)
    }

    /// All locations in registration order
    pub fn path_list(&self) -> Vec<String> {
        self.path_index.iter().map(|&key| self.location(key)).collect()
    }

    pub fn path_for_node_id(&self, id: &str) -> Option<String> {
        self.key(id).map(|key| self.location(key))
    }

    /// Resolve a location produced by [`Tree::location`] back to a handle
    pub fn key_by_path(&self, path: &str) -> Option<NodeKey> {
        let id = path.rsplit(CHILDREN_SEGMENT).next()?;
        let key = self.key(id)?;
        (self.location(key) == path).then_some(key)
    }

    /// Owned copy of a node and everything below it
    pub fn snapshot(&self, key: NodeKey) -> Option<NodeSnapshot> {
        let node = self.nodes.get(key)?;
        Some(NodeSnapshot {
            id: node.id.clone(),
            parent: node.parent.and_then(|p| self.id_of(p)).map(str::to_string),
            active_child: node
                .active_child
                .and_then(|c| self.id_of(c))
                .map(str::to_string),
            orientation: node.orientation,
            is_focusable: node.is_focusable,
            select_action: node.select_action.clone(),
            wraps: node.wraps,
            order: node.order,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.snapshot(child))
                .collect(),
            extra: node.extra.clone(),
        })
    }
}
